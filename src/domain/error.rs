//! Domain error types

use thiserror::Error;

/// Error when parsing a video profile string
#[derive(Debug, Clone, Error)]
#[error("Invalid profile format: \"{input}\". Expected format: <width>x<height>@<density> (e.g., 720x1080@320)")]
pub struct ProfileParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
