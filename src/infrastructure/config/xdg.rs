//! XDG-compliant configuration storage

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Config store rooted at the XDG config directory
/// (`~/.config/screenrec/config.toml`)
pub struct XdgConfigStore {
    config_path: PathBuf,
}

impl XdgConfigStore {
    /// Create store using the platform config directory
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("screenrec");
        Self {
            config_path: config_dir.join("config.toml"),
        }
    }

    /// Create store with a custom config path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_path.exists() {
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content =
            toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        fs::write(&self.config_path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn path(&self) -> PathBuf {
        self.config_path.clone()
    }

    fn exists(&self) -> bool {
        self.config_path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.config_path.display().to_string(),
            ));
        }
        self.save(&AppConfig::defaults()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> XdgConfigStore {
        XdgConfigStore::with_path(tmp.path().join("config.toml"))
    }

    #[tokio::test]
    async fn load_missing_file_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let config = store(&tmp).load().await.unwrap();
        assert!(config.profile.is_none());
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        let mut config = AppConfig::defaults();
        config.profile = Some("1920x1080@96".to_string());
        config.notify = Some(true);
        store.save(&config).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.profile, Some("1920x1080@96".to_string()));
        assert_eq!(loaded.notify, Some(true));
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        store.init().await.unwrap();
        assert!(store.exists());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.profile, Some("720x1080@320".to_string()));

        assert!(matches!(
            store.init().await,
            Err(ConfigError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn invalid_toml_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "profile = [not toml").unwrap();

        let store = XdgConfigStore::with_path(path);
        assert!(matches!(
            store.load().await,
            Err(ConfigError::ParseError(_))
        ));
    }
}
