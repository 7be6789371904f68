//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod overlay;
pub mod poller;
pub mod ports;
pub mod recording;

// Re-export use cases
pub use overlay::OverlayController;
pub use poller::{ForegroundPoller, PollerHandle};
pub use recording::{RecordingConfig, RecordingController, RecordingError};
