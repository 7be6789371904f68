//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the application layer's port traits,
//! backed by external tools and platform services.

pub mod config;
pub mod encoder;
pub mod foreground;
pub mod notification;
pub mod overlay;
pub mod projection;
pub mod storage;

// Re-export adapters
pub use config::XdgConfigStore;
pub use encoder::FfmpegScreenEncoder;
pub use foreground::XdotoolForegroundInspector;
pub use notification::NotifyRustNotifier;
pub use overlay::{LayerShellOverlayHost, OverlayFrame};
pub use projection::X11ProjectionSource;
pub use storage::MediaDirStore;
