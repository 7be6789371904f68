//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod capture;
pub mod config;
pub mod error;
pub mod foreground;
pub mod overlay;

// Re-export common types
pub use capture::{CaptureToken, RecordingSession, SessionState, VideoProfile};
pub use config::AppConfig;
pub use error::*;
pub use foreground::{ForegroundSnapshot, PollDecision};
pub use overlay::{OverlayCommand, OverlayEffect, OverlayState, OverlayView, ViewGeometry};
