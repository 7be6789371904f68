//! Overlay surface host implementations

pub mod layer_shell_host;

pub use layer_shell_host::{LayerShellOverlayHost, OverlayFrame, BIG_GEOMETRY, SMALL_GEOMETRY};
