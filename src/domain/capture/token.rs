//! Capture grant token

/// One-shot grant allowing screen pixels to be captured from a display.
///
/// The token is deliberately not `Clone`: it is owned by exactly one
/// recording session at a time and is consumed when the session releases
/// it. A fresh grant must be obtained for the next session.
#[derive(Debug, PartialEq, Eq)]
pub struct CaptureToken {
    display: String,
}

impl CaptureToken {
    /// Wrap a granted display handle
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
        }
    }

    /// The display this token grants capture access to
    pub fn display(&self) -> &str {
        &self.display
    }
}
