//! Recording session controller use case

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::capture::{
    CaptureToken, InvalidStateTransition, RecordingSession, SessionState, VideoProfile,
};

use super::ports::{
    EncoderError, NotificationIcon, Notifier, OutputStore, ScreenEncoder, StorageError,
};

/// Errors from the recording controller
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("Encoder failed: {0}")]
    Encoder(#[from] EncoderError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Configuration for the recording controller
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Capture geometry and density
    pub profile: VideoProfile,
    /// Whether to show notifications
    pub enable_notify: bool,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            profile: VideoProfile::default(),
            enable_notify: false,
        }
    }
}

/// Recording session controller.
///
/// Owns the capture grant, the encoder binding, and the at-most-one-
/// active-session invariant. Rejections (no grant, already running,
/// nothing to stop) are reported as `Ok(false)`; real failures abort the
/// attempt, release whatever was allocated, and return the session to
/// idle.
pub struct RecordingController<E, S, N>
where
    E: ScreenEncoder,
    S: OutputStore,
    N: Notifier,
{
    encoder: E,
    store: S,
    notifier: N,
    session: Arc<Mutex<RecordingSession>>,
    profile: Mutex<VideoProfile>,
    current_output: Mutex<Option<PathBuf>>,
    // Read by the poller task while the command task writes it.
    running: Arc<AtomicBool>,
    enable_notify: bool,
}

impl<E, S, N> RecordingController<E, S, N>
where
    E: ScreenEncoder,
    S: OutputStore,
    N: Notifier,
{
    /// Create a new controller with an idle session
    pub fn new(encoder: E, store: S, notifier: N, config: RecordingConfig) -> Self {
        Self {
            encoder,
            store,
            notifier,
            session: Arc::new(Mutex::new(RecordingSession::new())),
            profile: Mutex::new(config.profile),
            current_output: Mutex::new(None),
            running: Arc::new(AtomicBool::new(false)),
            enable_notify: config.enable_notify,
        }
    }

    /// Set the session parameters. Must be called before `start`;
    /// takes effect from the next started session.
    pub async fn configure(&self, profile: VideoProfile) {
        *self.profile.lock().await = profile;
    }

    /// Hand a fresh capture grant to the session.
    /// Rejected (returns false) while a session is running.
    pub async fn grant(&self, token: CaptureToken) -> bool {
        self.session.lock().await.grant(token).is_ok()
    }

    /// Start a recording session.
    ///
    /// Returns `Ok(false)` when no grant is held or a session is already
    /// running. On success the encoder is bound to the granted display
    /// and a container file named `<unix-millis>.mp4` is created in the
    /// save directory.
    pub async fn start(&self) -> Result<bool, RecordingError> {
        let mut session = self.session.lock().await;
        if !session.is_granted() {
            return Ok(false);
        }
        if self.encoder.is_encoding() {
            // The encoder still holds a previous bind; the grant is
            // dropped so the next attempt starts from a clean request.
            session.abort();
            return Err(EncoderError::AlreadyEncoding.into());
        }

        let dir = match self.store.save_dir().await {
            Ok(dir) => dir,
            Err(e) => {
                session.abort();
                return Err(e.into());
            }
        };
        let output = dir.join(format!("{}.mp4", unix_millis()));
        let profile = *self.profile.lock().await;

        let started = match session.token() {
            Some(token) => self.encoder.start(token, profile, &output).await,
            None => return Ok(false),
        };
        if let Err(e) = started {
            session.abort();
            return Err(e.into());
        }
        session.begin()?;

        *self.current_output.lock().await = Some(output);
        self.running.store(true, Ordering::SeqCst);

        if self.enable_notify {
            let _ = self
                .notifier
                .notify(
                    "ScreenRec",
                    &format!("Recording to {}", dir.display()),
                    NotificationIcon::Recording,
                )
                .await;
        }

        Ok(true)
    }

    /// Stop the running session, finalize the output file, and release
    /// the capture grant. Returns `Ok(false)` when nothing is running.
    pub async fn stop(&self) -> Result<bool, RecordingError> {
        let mut session = self.session.lock().await;
        if !session.is_running() {
            return Ok(false);
        }

        self.running.store(false, Ordering::SeqCst);
        let result = self.encoder.stop().await;
        if result.is_err() {
            // Finalization failed: discard whatever partial file the
            // encoder left behind instead of surfacing a broken one.
            let _ = self.encoder.abort().await;
        }

        // The grant is consumed here even if finalization failed; a
        // fresh one is needed for the next session.
        drop(session.finish()?);
        let output = self.current_output.lock().await.take();
        drop(session);

        result?;

        if self.enable_notify {
            if let Some(path) = output {
                let _ = self
                    .notifier
                    .notify(
                        "ScreenRec",
                        &format!("Saved {}", path.display()),
                        NotificationIcon::Success,
                    )
                    .await;
            }
        }

        Ok(true)
    }

    /// Pure query: is a session running right now
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Shared flag for tasks that need to observe the running state
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Current session state
    pub async fn session_state(&self) -> SessionState {
        self.session.lock().await.state()
    }

    /// Teardown path: stop a running session so the container file is
    /// finalized, and drop any unused grant.
    pub async fn force_stop(&self) {
        if self.is_running() {
            let _ = self.stop().await;
        } else {
            self.session.lock().await.abort();
        }
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
