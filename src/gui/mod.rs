//! GUI layer - Wayland overlay surface
//!
//! Renders the floating overlay views on a layer-shell surface.

pub mod layer_shell;

pub use layer_shell::{run_overlay, LayerShellError};
