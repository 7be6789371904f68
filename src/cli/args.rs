//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::config::AppConfig;

/// ScreenRec - screen recorder with a floating overlay
#[derive(Parser, Debug)]
#[command(name = "screenrec")]
#[command(version)]
#[command(about = "Screen recorder with a floating overlay controlled from the desktop")]
#[command(long_about = None)]
pub struct Cli {
    /// Capture profile as <width>x<height>@<density> (e.g. 720x1080@320)
    #[arg(short = 'p', long, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Directory recordings are saved to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Foreground poll period in milliseconds
    #[arg(long, value_name = "MS")]
    pub poll_interval: Option<u64>,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Send commands to the running service
    Ctl {
        #[command(subcommand)]
        action: CtlAction,
    },
}

/// Service control actions, mirroring the overlay buttons
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum CtlAction {
    /// Expand the small overlay into the control panel
    Expand,
    /// Start/stop recording (the panel's record button)
    Start,
    /// Collapse the control panel back to the small view
    Back,
    /// Hide the overlay and stop the service
    Close,
    /// Show overlay and session status
    Status,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

impl Cli {
    /// Build the config fragment carried by the CLI flags
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            profile: self.profile.clone(),
            output_dir: self.output_dir.clone(),
            poll_interval_ms: self.poll_interval,
            notify: if self.notify { Some(true) } else { None },
            home_classes: None,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "profile",
    "output_dir",
    "poll_interval_ms",
    "notify",
    "home_classes",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["screenrec"]);
        assert!(cli.profile.is_none());
        assert!(cli.output_dir.is_none());
        assert!(cli.poll_interval.is_none());
        assert!(!cli.notify);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_profile() {
        let cli = Cli::parse_from(["screenrec", "-p", "1920x1080@96"]);
        assert_eq!(cli.profile, Some("1920x1080@96".to_string()));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "screenrec",
            "-o",
            "/tmp/rec",
            "--poll-interval",
            "250",
            "-n",
        ]);
        assert_eq!(cli.output_dir, Some("/tmp/rec".to_string()));
        assert_eq!(cli.poll_interval, Some(250));
        assert!(cli.notify);
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["screenrec", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["screenrec", "config", "set", "profile", "1280x720@160"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "profile");
            assert_eq!(value, "1280x720@160");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_ctl_actions() {
        for (arg, expected) in [
            ("expand", "Expand"),
            ("start", "Start"),
            ("back", "Back"),
            ("close", "Close"),
            ("status", "Status"),
        ] {
            let cli = Cli::parse_from(["screenrec", "ctl", arg]);
            match cli.command {
                Some(Commands::Ctl { action }) => {
                    assert_eq!(format!("{:?}", action), expected);
                }
                _ => panic!("Expected Ctl command for {}", arg),
            }
        }
    }

    #[test]
    fn to_config_carries_flags() {
        let cli = Cli::parse_from(["screenrec", "-p", "1280x720@160", "-n"]);
        let config = cli.to_config();
        assert_eq!(config.profile, Some("1280x720@160".to_string()));
        assert_eq!(config.notify, Some(true));
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn to_config_leaves_notify_unset_without_flag() {
        let cli = Cli::parse_from(["screenrec"]);
        // A missing flag must not override a configured true.
        assert!(cli.to_config().notify.is_none());
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("profile"));
        assert!(is_valid_config_key("poll_interval_ms"));
        assert!(is_valid_config_key("home_classes"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
