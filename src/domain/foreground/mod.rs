//! Foreground detection domain

/// Default poll period in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Snapshot of the current foreground application, recomputed on every
/// poll tick. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundSnapshot {
    /// Window class (or package) of the focused application
    pub focused: String,
    /// Whether the focused application belongs to the home/launcher set
    pub is_home: bool,
}

impl ForegroundSnapshot {
    pub fn new(focused: impl Into<String>, is_home: bool) -> Self {
        Self {
            focused: focused.into(),
            is_home,
        }
    }
}

/// Decision issued for one poll tick. Exactly one fires per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// Foreground is home and the overlay is hidden: show it
    Show,
    /// Foreground left home while the overlay is visible: hide it
    Hide,
    /// Foreground is home and the overlay is already visible: no visual
    /// change, reserved for live-stat updates
    Refresh,
    /// Nothing to do
    Ignore,
}

/// Pure decision function over the two poll inputs.
pub const fn decide(is_foreground_home: bool, is_overlay_visible: bool) -> PollDecision {
    match (is_foreground_home, is_overlay_visible) {
        (true, false) => PollDecision::Show,
        (false, true) => PollDecision::Hide,
        (true, true) => PollDecision::Refresh,
        (false, false) => PollDecision::Ignore,
    }
}
