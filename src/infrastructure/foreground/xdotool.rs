//! xdotool-based foreground inspector

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{ForegroundError, ForegroundInspector};
use crate::domain::foreground::ForegroundSnapshot;

/// Foreground inspector that shells out to xdotool.
///
/// One invocation resolves the active window and its class; the class is
/// then matched against the configured desktop shell classes to decide
/// whether the home screen has the foreground.
pub struct XdotoolForegroundInspector {
    home_classes: Vec<String>,
}

impl XdotoolForegroundInspector {
    /// Create an inspector matching against the given shell classes
    pub fn new(home_classes: Vec<String>) -> Self {
        Self { home_classes }
    }

    /// Classify a window class as home or not
    fn is_home(&self, class: &str) -> bool {
        self.home_classes
            .iter()
            .any(|home| home.eq_ignore_ascii_case(class))
    }
}

#[async_trait]
impl ForegroundInspector for XdotoolForegroundInspector {
    async fn snapshot(&self) -> Result<ForegroundSnapshot, ForegroundError> {
        let output = Command::new("xdotool")
            .args(["getactivewindow", "getwindowclassname"])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ForegroundError::XdotoolNotFound
                } else {
                    ForegroundError::QueryFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ForegroundError::QueryFailed(stderr.trim().to_string()));
        }

        let class = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let is_home = self.is_home(&class);
        Ok(ForegroundSnapshot::new(class, is_home))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::AppConfig;

    fn inspector() -> XdotoolForegroundInspector {
        XdotoolForegroundInspector::new(AppConfig::defaults().home_classes_or_default())
    }

    #[test]
    fn desktop_shells_classify_as_home() {
        let inspector = inspector();
        assert!(inspector.is_home("plasmashell"));
        assert!(inspector.is_home("gnome-shell"));
        assert!(inspector.is_home("GNOME-Shell"));
    }

    #[test]
    fn applications_do_not_classify_as_home() {
        let inspector = inspector();
        assert!(!inspector.is_home("firefox"));
        assert!(!inspector.is_home("Alacritty"));
        assert!(!inspector.is_home(""));
    }

    #[test]
    fn custom_classes_are_honored() {
        let inspector = XdotoolForegroundInspector::new(vec!["my-shell".to_string()]);
        assert!(inspector.is_home("my-shell"));
        assert!(!inspector.is_home("plasmashell"));
    }
}
