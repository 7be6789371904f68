//! Screen encoder port interface

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::capture::{CaptureToken, VideoProfile};

/// Encoder errors
#[derive(Debug, Clone, Error)]
pub enum EncoderError {
    #[error("Encoder binary not found: {0}")]
    EncoderNotFound(String),

    #[error("Failed to start encoder: {0}")]
    StartFailed(String),

    #[error("Encoding failed: {0}")]
    EncodeFailed(String),

    #[error("Encoder is already running")]
    AlreadyEncoding,

    #[error("No encoding in progress")]
    NotEncoding,
}

/// Port for the virtual-display-to-encoder pipeline.
///
/// Implementations bind the display granted by the capture token to an
/// encoder sink configured from the video profile and write one container
/// file per session.
#[async_trait]
pub trait ScreenEncoder: Send + Sync {
    /// Start encoding the captured display into `output`.
    async fn start(
        &self,
        token: &CaptureToken,
        profile: VideoProfile,
        output: &Path,
    ) -> Result<(), EncoderError>;

    /// Stop encoding gracefully and finalize the container file.
    async fn stop(&self) -> Result<(), EncoderError>;

    /// Kill the encoder and discard the partial output file.
    async fn abort(&self) -> Result<(), EncoderError>;

    /// Check if currently encoding
    fn is_encoding(&self) -> bool;
}
