//! Capture grant port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::capture::CaptureToken;

/// Projection errors
#[derive(Debug, Clone, Error)]
pub enum ProjectionError {
    #[error("No display available to capture")]
    NoDisplay,

    #[error("Capture request was denied: {0}")]
    Denied(String),
}

/// Port for obtaining one-shot capture grants.
///
/// `request` completes exactly when the grant is resolved, so callers
/// never need to guess how long the permission flow takes.
#[async_trait]
pub trait ProjectionSource: Send + Sync {
    /// Request a fresh capture grant for the current display.
    async fn request(&self) -> Result<CaptureToken, ProjectionError>;
}
