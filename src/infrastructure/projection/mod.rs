//! Capture grant implementations

pub mod x11;

pub use x11::X11ProjectionSource;
