//! Foreground inspection port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foreground::ForegroundSnapshot;

/// Foreground inspection errors
#[derive(Debug, Clone, Error)]
pub enum ForegroundError {
    #[error("xdotool not found")]
    XdotoolNotFound,

    #[error("Failed to query foreground window: {0}")]
    QueryFailed(String),
}

/// Port for inspecting which application currently has the foreground
#[async_trait]
pub trait ForegroundInspector: Send + Sync {
    /// Take a snapshot of the current foreground application.
    async fn snapshot(&self) -> Result<ForegroundSnapshot, ForegroundError>;
}
