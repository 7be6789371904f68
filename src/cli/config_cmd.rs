//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::capture::VideoProfile;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    // Update the appropriate field
    match key {
        "profile" => config.profile = Some(value.to_string()),
        "output_dir" => config.output_dir = Some(value.to_string()),
        "poll_interval_ms" => {
            config.poll_interval_ms =
                Some(value.parse().map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a positive integer".to_string(),
                })?)
        }
        "notify" => {
            config.notify = Some(parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be 'true' or 'false'".to_string(),
            })?)
        }
        "home_classes" => config.home_classes = Some(parse_class_list(value)),
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "profile" => config.profile,
        "output_dir" => config.output_dir,
        "poll_interval_ms" => config.poll_interval_ms.map(|v| v.to_string()),
        "notify" => config.notify.map(|b| b.to_string()),
        "home_classes" => config.home_classes.map(|v| v.join(",")),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value("profile", config.profile.as_deref().unwrap_or("(not set)"));
    presenter.key_value(
        "output_dir",
        config.output_dir.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "poll_interval_ms",
        &config
            .poll_interval_ms
            .map(|v| v.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "notify",
        &config
            .notify
            .map(|b| b.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "home_classes",
        &config
            .home_classes
            .map(|v| v.join(","))
            .unwrap_or_else(|| "(not set)".to_string()),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "profile" => {
            value
                .parse::<VideoProfile>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "poll_interval_ms" => {
            let ms: u64 = value.parse().map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be a positive integer".to_string(),
            })?;
            if ms == 0 {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Poll period must be greater than zero".to_string(),
                });
            }
        }
        "notify" => {
            parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be 'true' or 'false'".to_string(),
            })?;
        }
        "home_classes" => {
            if parse_class_list(value).is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "At least one window class is required".to_string(),
                });
            }
        }
        _ => {} // output_dir accepts any string
    }
    Ok(())
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Parse a comma-separated window-class list
fn parse_class_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn parse_class_list_trims_and_drops_empties() {
        assert_eq!(
            parse_class_list("plasmashell, gnome-shell ,,Desktop"),
            vec!["plasmashell", "gnome-shell", "Desktop"]
        );
        assert!(parse_class_list(" , ").is_empty());
    }

    #[test]
    fn validate_profile_valid() {
        assert!(validate_config_value("profile", "720x1080@320").is_ok());
        assert!(validate_config_value("profile", "1920x1080").is_ok());
    }

    #[test]
    fn validate_profile_invalid() {
        assert!(validate_config_value("profile", "invalid").is_err());
        assert!(validate_config_value("profile", "0x0@320").is_err());
    }

    #[test]
    fn validate_poll_interval() {
        assert!(validate_config_value("poll_interval_ms", "500").is_ok());
        assert!(validate_config_value("poll_interval_ms", "0").is_err());
        assert!(validate_config_value("poll_interval_ms", "fast").is_err());
    }

    #[test]
    fn validate_home_classes() {
        assert!(validate_config_value("home_classes", "plasmashell,Desktop").is_ok());
        assert!(validate_config_value("home_classes", " , ").is_err());
    }
}
