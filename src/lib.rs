//! ScreenRec - screen recorder with a floating overlay
//!
//! This crate provides the core functionality for recording the screen
//! into H.264 video files while a small floating overlay tracks the
//! desktop and offers start/stop controls.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (FFmpeg, xdotool, storage, etc.)
//! - **CLI**: Command-line interface, argument parsing, and signal handling
//! - **GUI**: Floating overlay views (Linux only, uses Wayland layer-shell)

pub mod application;
pub mod cli;
pub mod domain;
#[cfg(target_os = "linux")]
pub mod gui;
pub mod infrastructure;
