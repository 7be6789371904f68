//! Capture domain: session lifecycle, grant token, video profile

pub mod profile;
pub mod session;
pub mod token;

pub use profile::{VideoProfile, VIDEO_BIT_RATE, VIDEO_FRAME_RATE};
pub use session::{InvalidStateTransition, RecordingSession, SessionState};
pub use token::CaptureToken;
