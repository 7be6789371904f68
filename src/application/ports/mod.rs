//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod encoder;
pub mod foreground;
pub mod notifier;
pub mod overlay;
pub mod projection;
pub mod storage;

// Re-export common types
pub use config::ConfigStore;
pub use encoder::{EncoderError, ScreenEncoder};
pub use foreground::{ForegroundError, ForegroundInspector};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use overlay::{OverlayHost, OverlayHostError};
pub use projection::{ProjectionError, ProjectionSource};
pub use storage::{OutputStore, StorageError};
