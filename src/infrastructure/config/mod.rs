//! Configuration storage implementations

pub mod xdg;

pub use xdg::XdgConfigStore;
