//! Recording session state machine

use std::fmt;
use thiserror::Error;

use super::token::CaptureToken;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    CaptureGranted,
    Running,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CaptureGranted => "granted",
            Self::Running => "recording",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Recording session entity.
/// Owns the capture token and manages lifecycle transitions.
///
/// State machine:
///   IDLE -> CAPTURE_GRANTED (grant)
///   CAPTURE_GRANTED -> RUNNING (begin)
///   RUNNING -> IDLE (finish, token consumed)
///   any -> IDLE (abort, token consumed)
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: SessionState,
    token: Option<CaptureToken>,
}

impl RecordingSession {
    /// Create a new session in idle state with no grant
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            token: None,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if currently idle (no grant held)
    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Check if a capture grant is held but recording has not started
    pub fn is_granted(&self) -> bool {
        self.state == SessionState::CaptureGranted
    }

    /// Check if currently recording
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// The held capture token, if any
    pub fn token(&self) -> Option<&CaptureToken> {
        self.token.as_ref()
    }

    /// Store a capture grant. Re-granting before `begin` replaces the
    /// previous token; granting while recording is rejected.
    pub fn grant(&mut self, token: CaptureToken) -> Result<(), InvalidStateTransition> {
        if self.state == SessionState::Running {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "grant capture".to_string(),
            });
        }
        self.token = Some(token);
        self.state = SessionState::CaptureGranted;
        Ok(())
    }

    /// Transition from CAPTURE_GRANTED to RUNNING
    pub fn begin(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::CaptureGranted {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "begin recording".to_string(),
            });
        }
        self.state = SessionState::Running;
        Ok(())
    }

    /// Transition from RUNNING to IDLE, yielding the token so the caller
    /// can release it. The token cannot be reused afterwards.
    pub fn finish(&mut self) -> Result<CaptureToken, InvalidStateTransition> {
        if self.state != SessionState::Running {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "finish recording".to_string(),
            });
        }
        self.state = SessionState::Idle;
        self.token.take().ok_or_else(|| InvalidStateTransition {
            current_state: SessionState::Idle,
            action: "finish recording".to_string(),
        })
    }

    /// Drop back to IDLE from any state, yielding the token if one was
    /// held. Used when a start attempt fails partway or the service is
    /// torn down.
    pub fn abort(&mut self) -> Option<CaptureToken> {
        self.state = SessionState::Idle;
        self.token.take()
    }
}
