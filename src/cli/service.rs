//! Service runner: overlay, poller, control socket, and recording session

use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::application::ports::{
    Notifier, OutputStore, OverlayHost, ProjectionSource, ScreenEncoder,
};
use crate::application::{
    ForegroundPoller, OverlayController, PollerHandle, RecordingConfig, RecordingController,
};
use crate::domain::capture::SessionState;
use crate::domain::config::AppConfig;
use crate::domain::foreground::PollDecision;
use crate::domain::overlay::{OverlayEffect, OverlayState};
use crate::infrastructure::{
    FfmpegScreenEncoder, LayerShellOverlayHost, MediaDirStore, NotifyRustNotifier,
    X11ProjectionSource, XdotoolForegroundInspector,
};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::{ServiceSignal, ServiceSignalHandler};
use super::socket::{ControlSocketServer, ServiceStatus, SocketPath};

/// Run the recorder service
pub async fn run_service(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    // Acquire PID file
    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another instance is already running (PID: {})", pid));
            }
            _ => {
                presenter.error(&e.to_string());
            }
        }
        return ExitCode::from(EXIT_ERROR);
    }

    // Create adapters
    let encoder = FfmpegScreenEncoder::new();
    let store = match config.output_dir.as_deref() {
        Some(dir) => MediaDirStore::with_base(dir),
        None => MediaDirStore::new(),
    };
    let notifier = NotifyRustNotifier::new();
    let projection = X11ProjectionSource::new();
    let inspector = Arc::new(XdotoolForegroundInspector::new(
        config.home_classes_or_default(),
    ));

    // Recording session controller
    let recorder = RecordingController::new(
        encoder,
        store,
        notifier,
        RecordingConfig {
            profile: config.profile_or_default(),
            enable_notify: config.notify_or_default(),
        },
    );

    // Overlay render thread. When it cannot come up the overlay host
    // reports PermissionDenied and the service keeps running headless.
    let gui_alive = Arc::new(std::sync::atomic::AtomicBool::new(true));
    let (frame_tx, frame_rx) = mpsc::unbounded_channel();
    #[cfg(target_os = "linux")]
    {
        let running_flag = recorder.running_flag();
        let alive = Arc::clone(&gui_alive);
        std::thread::spawn(move || {
            if let Err(e) = crate::gui::run_overlay(frame_rx, running_flag) {
                eprintln!("Overlay unavailable: {}", e);
            }
            alive.store(false, Ordering::SeqCst);
        });
    }
    #[cfg(not(target_os = "linux"))]
    {
        drop(frame_rx);
        gui_alive.store(false, Ordering::SeqCst);
    }

    let overlay = OverlayController::new(LayerShellOverlayHost::new(frame_tx, gui_alive));

    // Setup signal handler (returns handler + sender for event sources)
    let (mut signals, signal_tx) = match ServiceSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Setup control socket server
    let socket_path = SocketPath::new();
    let mut socket_server = ControlSocketServer::new(socket_path.clone());

    if let Err(e) = socket_server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    // Shared status for socket status queries
    let status = Arc::new(Mutex::new(ServiceStatus {
        overlay: OverlayState::Hidden,
        session: SessionState::Idle,
    }));
    let status_for_socket = Arc::clone(&status);

    // Spawn socket server task
    let socket_tx = signal_tx.clone();
    tokio::spawn(async move {
        let _ = socket_server
            .run(socket_tx, move || {
                *status_for_socket.lock().unwrap_or_else(|e| e.into_inner())
            })
            .await;
    });

    // Spawn the foreground poller, forwarding decisions into the loop
    let (poll_tx, mut poll_rx) = mpsc::channel(16);
    let poller = ForegroundPoller::spawn(
        inspector,
        config.poll_interval_or_default(),
        overlay.showing_flag(),
        poll_tx,
    );
    let forward_tx = signal_tx.clone();
    tokio::spawn(async move {
        while let Some(decision) = poll_rx.recv().await {
            if forward_tx.send(ServiceSignal::Poll(decision)).await.is_err() {
                break;
            }
        }
    });

    presenter.service_status("Started, polling foreground...");
    presenter.info(&format!(
        "PID: {} | Socket: {} | SIGINT: exit",
        std::process::id(),
        socket_path.path().display()
    ));

    // Main signal loop
    let result = service_loop(
        &recorder,
        &overlay,
        &projection,
        &poller,
        &mut signals,
        &presenter,
        &status,
    )
    .await;

    // Teardown: stop polling, finalize any running session, drop views
    poller.stop();
    recorder.force_stop().await;
    let _ = overlay.hide().await;
    poller.join().await;
    let _ = pid_file.release();
    let _ = socket_path.cleanup();

    if result {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

async fn service_loop<E, S, N, H, P>(
    recorder: &RecordingController<E, S, N>,
    overlay: &OverlayController<H>,
    projection: &P,
    poller: &PollerHandle,
    signals: &mut ServiceSignalHandler,
    presenter: &Presenter,
    status: &Arc<Mutex<ServiceStatus>>,
) -> bool
where
    E: ScreenEncoder,
    S: OutputStore,
    N: Notifier,
    H: OverlayHost,
    P: ProjectionSource,
{
    loop {
        // Publish current state for socket status queries. The states
        // are awaited first; the std lock is held only for the copy,
        // so the socket task never blocks on an await in this loop.
        let overlay_state = overlay.state().await;
        let session_state = recorder.session_state().await;
        if let Ok(mut guard) = status.lock() {
            guard.overlay = overlay_state;
            guard.session = session_state;
        }

        let signal = signals.recv().await;

        match signal {
            Some(ServiceSignal::Poll(decision)) => match decision {
                PollDecision::Show => {
                    match overlay.show_small().await {
                        // Denied by the window system: stay hidden,
                        // the poller will retry on later ticks.
                        Ok(false) => {}
                        Ok(true) => {}
                        Err(e) => presenter.warn(&format!("Overlay show failed: {}", e)),
                    }
                }
                PollDecision::Hide => {
                    if let Err(e) = overlay.hide().await {
                        presenter.warn(&format!("Overlay hide failed: {}", e));
                    }
                }
                PollDecision::Refresh => {
                    // The render thread redraws from the live session
                    // state; a visible overlay needs no new frame here.
                }
                PollDecision::Ignore => {}
            },
            Some(ServiceSignal::Overlay(command)) => {
                let effect = match overlay.handle(command).await {
                    Ok(effect) => effect,
                    Err(e) => {
                        presenter.error(&format!("Overlay command failed: {}", e));
                        continue;
                    }
                };

                match effect {
                    OverlayEffect::None => {}
                    OverlayEffect::ToggleRecording => {
                        toggle_recording(recorder, projection, presenter).await;
                    }
                    OverlayEffect::StopService => {
                        presenter.service_status("Stopped from overlay");
                        if poller.stop() {
                            presenter.info("Foreground polling stopped");
                        }
                        return true;
                    }
                }
            }
            Some(ServiceSignal::Shutdown) => {
                presenter.service_status("Shutting down...");
                return true;
            }
            None => {
                // Channel closed
                return false;
            }
        }
    }
}

/// The record button: stop when running, otherwise request a fresh
/// capture grant and start a new session.
async fn toggle_recording<E, S, N, P>(
    recorder: &RecordingController<E, S, N>,
    projection: &P,
    presenter: &Presenter,
) where
    E: ScreenEncoder,
    S: OutputStore,
    N: Notifier,
    P: ProjectionSource,
{
    if recorder.is_running() {
        match recorder.stop().await {
            Ok(true) => presenter.service_status("Recording saved"),
            Ok(false) => presenter.warn("Nothing to stop"),
            Err(e) => presenter.error(&format!("Failed to stop recording: {}", e)),
        }
        return;
    }

    // The grant completes before start is attempted, so the session
    // never starts against a pending permission.
    let token = match projection.request().await {
        Ok(token) => token,
        Err(e) => {
            presenter.error(&format!("Capture request failed: {}", e));
            return;
        }
    };

    if !recorder.grant(token).await {
        presenter.warn("Capture grant rejected");
        return;
    }

    match recorder.start().await {
        Ok(true) => presenter.service_status("Recording..."),
        Ok(false) => presenter.warn("Recording not started"),
        Err(e) => presenter.error(&format!("Failed to start recording: {}", e)),
    }
}
