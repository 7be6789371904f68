//! Desktop notifications via notify-rust

use async_trait::async_trait;
use notify_rust::Notification;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Notifier backed by the desktop notification daemon
pub struct NotifyRustNotifier {
    app_name: String,
}

impl NotifyRustNotifier {
    pub fn new() -> Self {
        Self {
            app_name: "ScreenRec".to_string(),
        }
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let app_name = self.app_name.clone();
        let title = title.to_string();
        let message = message.to_string();
        let icon_name = icon.icon_name();

        // notify-rust blocks on the session bus.
        tokio::task::spawn_blocking(move || {
            Notification::new()
                .appname(&app_name)
                .summary(&title)
                .body(&message)
                .icon(icon_name)
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::SendFailed(e.to_string()))?
    }
}
