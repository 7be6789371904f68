//! Foreground inspection implementations

pub mod xdotool;

pub use xdotool::XdotoolForegroundInspector;
