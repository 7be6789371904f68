//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the service runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod ctl_cmd;
pub mod pid_file;
pub mod presenter;
pub mod service;
pub mod signals;
pub mod socket;

// Re-export commonly used types
pub use app::{load_merged_config, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, CtlAction};
pub use config_cmd::handle_config_command;
pub use ctl_cmd::handle_ctl_command;
pub use presenter::Presenter;
pub use service::run_service;
