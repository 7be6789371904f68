//! Output storage port interface

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// External storage is not mounted or the directory cannot be created.
    #[error("Save directory unavailable: {0}")]
    Unavailable(String),
}

/// Port for resolving where finished recordings are written
#[async_trait]
pub trait OutputStore: Send + Sync {
    /// Resolve (and create if needed) the save directory.
    async fn save_dir(&self) -> Result<PathBuf, StorageError>;
}
