//! Overlay domain: view states, geometry, and command dispatch
//!
//! The overlay is a pair of mutually exclusive floating views: a small
//! launcher dot and a big control panel. Exactly one may be attached at a
//! time; every transition goes through [`apply`].

use std::fmt;

/// Overlay visibility states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlayState {
    #[default]
    Hidden,
    ShowingSmall,
    ShowingBig,
}

impl OverlayState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::ShowingSmall => "small",
            Self::ShowingBig => "big",
        }
    }

    /// Whether any view is attached in this state
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// The view attached in this state, if any
    pub const fn view(&self) -> Option<OverlayView> {
        match self {
            Self::Hidden => None,
            Self::ShowingSmall => Some(OverlayView::Small),
            Self::ShowingBig => Some(OverlayView::Big),
        }
    }
}

impl fmt::Display for OverlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two overlay views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayView {
    Small,
    Big,
}

/// Attached size of an overlay view, recorded for drag repositioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewGeometry {
    pub width: u32,
    pub height: u32,
}

impl ViewGeometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// User commands targeting the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCommand {
    /// Tap on the small view: expand to the control panel
    Expand,
    /// Start/stop button on the control panel
    Start,
    /// Back button: collapse to the small view
    Back,
    /// Close button: hide the overlay and stop the service
    Close,
}

/// Side effect a command dispatch asks the service to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEffect {
    /// No service action, only a (possible) view change
    None,
    /// Toggle the recording session
    ToggleRecording,
    /// Tear the owning service down
    StopService,
}

/// Single transition function for overlay commands.
///
/// Commands that do not apply to the current state leave it unchanged
/// with no effect; while hidden, every command is ignored.
pub const fn apply(state: OverlayState, command: OverlayCommand) -> (OverlayState, OverlayEffect) {
    use OverlayCommand as Cmd;
    use OverlayState as St;

    match (state, command) {
        (St::Hidden, _) => (St::Hidden, OverlayEffect::None),
        (St::ShowingSmall, Cmd::Expand) => (St::ShowingBig, OverlayEffect::None),
        (St::ShowingBig, Cmd::Back) => (St::ShowingSmall, OverlayEffect::None),
        (St::ShowingBig, Cmd::Start) => (St::ShowingBig, OverlayEffect::ToggleRecording),
        (_, Cmd::Close) => (St::Hidden, OverlayEffect::StopService),
        (state, _) => (state, OverlayEffect::None),
    }
}
