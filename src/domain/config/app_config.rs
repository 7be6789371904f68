//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::capture::VideoProfile;
use crate::domain::foreground::DEFAULT_POLL_INTERVAL_MS;

/// Default home/launcher window classes covering the common desktop shells.
pub const DEFAULT_HOME_CLASSES: &[&str] = &[
    "plasmashell",
    "Plasma",
    "gnome-shell",
    "Desktop",
    "nemo-desktop",
    "pcmanfm-desktop",
    "xfdesktop",
];

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Capture profile string, e.g. "720x1080@320"
    pub profile: Option<String>,
    /// Output directory override (defaults to <videos>/ScreenRecord)
    pub output_dir: Option<String>,
    /// Foreground poll period in milliseconds
    pub poll_interval_ms: Option<u64>,
    /// Show desktop notifications
    pub notify: Option<bool>,
    /// Window classes treated as the home/launcher foreground
    pub home_classes: Option<Vec<String>>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            profile: Some(VideoProfile::default().to_string()),
            output_dir: None,
            poll_interval_ms: Some(DEFAULT_POLL_INTERVAL_MS),
            notify: Some(false),
            home_classes: Some(
                DEFAULT_HOME_CLASSES
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            profile: other.profile.or(self.profile),
            output_dir: other.output_dir.or(self.output_dir),
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
            notify: other.notify.or(self.notify),
            home_classes: other.home_classes.or(self.home_classes),
        }
    }

    /// Get the profile as a parsed VideoProfile, or default if not set/invalid
    pub fn profile_or_default(&self) -> VideoProfile {
        self.profile
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get the poll period, or the 500ms default
    pub fn poll_interval_or_default(&self) -> std::time::Duration {
        std::time::Duration::from_millis(
            self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        )
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get the home window-class set, or the built-in defaults
    pub fn home_classes_or_default(&self) -> Vec<String> {
        self.home_classes.clone().unwrap_or_else(|| {
            DEFAULT_HOME_CLASSES
                .iter()
                .map(|s| s.to_string())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.profile, Some("720x1080@320".to_string()));
        assert!(config.output_dir.is_none());
        assert_eq!(config.poll_interval_ms, Some(500));
        assert_eq!(config.notify, Some(false));
        assert!(config
            .home_classes
            .as_ref()
            .unwrap()
            .iter()
            .any(|c| c == "plasmashell"));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.profile.is_none());
        assert!(config.output_dir.is_none());
        assert!(config.poll_interval_ms.is_none());
        assert!(config.notify.is_none());
        assert!(config.home_classes.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            profile: Some("720x1080@320".to_string()),
            output_dir: Some("/base".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            profile: Some("1920x1080@96".to_string()),
            output_dir: None, // Should not override
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.profile, Some("1920x1080@96".to_string()));
        assert_eq!(merged.output_dir, Some("/base".to_string())); // Kept from base
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            poll_interval_ms: Some(250),
            notify: Some(true),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.poll_interval_ms, Some(250));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn profile_or_default_parses() {
        let config = AppConfig {
            profile: Some("1280x720@160".to_string()),
            ..Default::default()
        };
        assert_eq!(config.profile_or_default().width(), 1280);
        assert_eq!(config.profile_or_default().density(), 160);
    }

    #[test]
    fn profile_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            profile: Some("invalid".to_string()),
            ..Default::default()
        };
        assert_eq!(config.profile_or_default(), VideoProfile::default());
    }

    #[test]
    fn poll_interval_default_is_500ms() {
        let config = AppConfig::empty();
        assert_eq!(config.poll_interval_or_default().as_millis(), 500);
    }

    #[test]
    fn boolean_defaults() {
        let config = AppConfig::empty();
        assert!(!config.notify_or_default());
    }

    #[test]
    fn home_classes_default_when_unset() {
        let config = AppConfig::empty();
        let classes = config.home_classes_or_default();
        assert!(classes.iter().any(|c| c == "gnome-shell"));
    }

    #[test]
    fn home_classes_configured() {
        let config = AppConfig {
            home_classes: Some(vec!["my-shell".to_string()]),
            ..Default::default()
        };
        assert_eq!(config.home_classes_or_default(), vec!["my-shell"]);
    }
}
