//! Desktop notification implementations

pub mod notify_rust;

pub use notify_rust::NotifyRustNotifier;
