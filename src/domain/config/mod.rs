//! Configuration domain

pub mod app_config;

pub use app_config::{AppConfig, DEFAULT_HOME_CLASSES};
