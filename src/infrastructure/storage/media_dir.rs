//! Recording save directory resolver

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{OutputStore, StorageError};

/// Subdirectory that collects finished recordings
pub const SAVE_DIR_NAME: &str = "ScreenRecord";

/// Stores recordings under `<videos>/ScreenRecord`.
///
/// The base is the user's videos directory, falling back to the home
/// directory when the platform does not define one. An explicit override
/// from the configuration wins over both.
pub struct MediaDirStore {
    override_dir: Option<PathBuf>,
}

impl MediaDirStore {
    /// Resolve against the platform media directories
    pub fn new() -> Self {
        Self { override_dir: None }
    }

    /// Resolve against an explicit base directory
    pub fn with_base(dir: impl Into<PathBuf>) -> Self {
        Self {
            override_dir: Some(dir.into()),
        }
    }

    fn resolve(&self) -> Result<PathBuf, StorageError> {
        if let Some(dir) = &self.override_dir {
            return Ok(dir.clone());
        }
        dirs::video_dir()
            .or_else(dirs::home_dir)
            .map(|base| base.join(SAVE_DIR_NAME))
            .ok_or_else(|| StorageError::Unavailable("No media directory".to_string()))
    }
}

impl Default for MediaDirStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputStore for MediaDirStore {
    async fn save_dir(&self) -> Result<PathBuf, StorageError> {
        let dir = self.resolve()?;
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::Unavailable(format!("{}: {}", dir.display(), e)))?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn creates_the_save_directory() {
        let tmp = TempDir::new().unwrap();
        let store = MediaDirStore::with_base(tmp.path().join("recordings"));

        let dir = store.save_dir().await.unwrap();
        assert!(dir.exists());
        assert_eq!(dir, tmp.path().join("recordings"));
    }

    #[tokio::test]
    async fn save_dir_is_stable_across_calls() {
        let tmp = TempDir::new().unwrap();
        let store = MediaDirStore::with_base(tmp.path().join("recordings"));

        let first = store.save_dir().await.unwrap();
        let second = store.save_dir().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unwritable_base_reports_unavailable() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        // A file where the directory should go makes creation fail.
        let store = MediaDirStore::with_base(blocker.join(SAVE_DIR_NAME));
        assert!(matches!(
            store.save_dir().await,
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn default_resolves_under_media_dirs() {
        let store = MediaDirStore::new();
        if let Ok(dir) = store.resolve() {
            assert!(dir.ends_with(SAVE_DIR_NAME));
        }
    }
}
