//! Overlay window manager use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::overlay::{
    apply, OverlayCommand, OverlayEffect, OverlayState, OverlayView, ViewGeometry,
};

use super::ports::{OverlayHost, OverlayHostError};

/// Overlay window manager.
///
/// Tracks which of the two floating views is attached and guarantees the
/// previous view is detached before the next one goes up. A window
/// system that refuses to host overlays makes show operations report
/// `Ok(false)` instead of failing the service.
pub struct OverlayController<H>
where
    H: OverlayHost,
{
    host: H,
    state: Mutex<OverlayState>,
    small_geometry: Mutex<Option<ViewGeometry>>,
    big_geometry: Mutex<Option<ViewGeometry>>,
    // Read by the poller task while the command task writes it.
    showing: Arc<AtomicBool>,
}

impl<H> OverlayController<H>
where
    H: OverlayHost,
{
    /// Create a hidden overlay manager
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: Mutex::new(OverlayState::Hidden),
            small_geometry: Mutex::new(None),
            big_geometry: Mutex::new(None),
            showing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Show the small launcher view. Idempotent when already showing it.
    pub async fn show_small(&self) -> Result<bool, OverlayHostError> {
        self.show(OverlayView::Small, OverlayState::ShowingSmall)
            .await
    }

    /// Show the big control panel. Idempotent when already showing it.
    pub async fn show_big(&self) -> Result<bool, OverlayHostError> {
        self.show(OverlayView::Big, OverlayState::ShowingBig).await
    }

    async fn show(&self, view: OverlayView, target: OverlayState) -> Result<bool, OverlayHostError> {
        let mut state = self.state.lock().await;
        if *state == target {
            return Ok(true);
        }

        if state.is_visible() {
            self.host.detach().await?;
            *state = OverlayState::Hidden;
            self.showing.store(false, Ordering::SeqCst);
        }

        match self.host.attach(view).await {
            Ok(geometry) => {
                match view {
                    OverlayView::Small => *self.small_geometry.lock().await = Some(geometry),
                    OverlayView::Big => *self.big_geometry.lock().await = Some(geometry),
                }
                *state = target;
                self.showing.store(true, Ordering::SeqCst);
                Ok(true)
            }
            // Overlay permission denied: fail silently, stay hidden.
            Err(OverlayHostError::PermissionDenied) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Detach whichever view is up. Idempotent.
    pub async fn hide(&self) -> Result<(), OverlayHostError> {
        let mut state = self.state.lock().await;
        if state.is_visible() {
            self.host.detach().await?;
            *state = OverlayState::Hidden;
            self.showing.store(false, Ordering::SeqCst);
        }
        Ok(())
    }

    /// Pure query: is any overlay view attached
    pub fn is_showing(&self) -> bool {
        self.showing.load(Ordering::SeqCst)
    }

    /// Shared flag for tasks that need to observe visibility
    pub fn showing_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.showing)
    }

    /// Current overlay state
    pub async fn state(&self) -> OverlayState {
        *self.state.lock().await
    }

    /// Geometry recorded when the view was last attached
    pub async fn geometry(&self, view: OverlayView) -> Option<ViewGeometry> {
        match view {
            OverlayView::Small => *self.small_geometry.lock().await,
            OverlayView::Big => *self.big_geometry.lock().await,
        }
    }

    /// Dispatch one overlay command through the transition function and
    /// perform the resulting view change. The returned effect is the
    /// service action the command asks for.
    pub async fn handle(&self, command: OverlayCommand) -> Result<OverlayEffect, OverlayHostError> {
        let current = *self.state.lock().await;
        let (target, effect) = apply(current, command);

        if target != current {
            match target {
                OverlayState::Hidden => self.hide().await?,
                OverlayState::ShowingSmall => {
                    self.show_small().await?;
                }
                OverlayState::ShowingBig => {
                    self.show_big().await?;
                }
            }
        }

        Ok(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Host mock that tracks the attached view and flags any attach that
    /// happens while another view is still up.
    struct MockHost {
        attached: Mutex<Option<OverlayView>>,
        attach_calls: AtomicUsize,
        detach_calls: AtomicUsize,
        double_attach: AtomicBool,
        deny: bool,
    }

    impl MockHost {
        fn new() -> Self {
            Self {
                attached: Mutex::new(None),
                attach_calls: AtomicUsize::new(0),
                detach_calls: AtomicUsize::new(0),
                double_attach: AtomicBool::new(false),
                deny: false,
            }
        }

        fn denying() -> Self {
            Self {
                deny: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl OverlayHost for MockHost {
        async fn attach(&self, view: OverlayView) -> Result<ViewGeometry, OverlayHostError> {
            if self.deny {
                return Err(OverlayHostError::PermissionDenied);
            }
            let mut attached = self.attached.lock().await;
            if attached.is_some() {
                self.double_attach.store(true, Ordering::SeqCst);
            }
            *attached = Some(view);
            self.attach_calls.fetch_add(1, Ordering::SeqCst);
            Ok(match view {
                OverlayView::Small => ViewGeometry::new(48, 48),
                OverlayView::Big => ViewGeometry::new(200, 96),
            })
        }

        async fn detach(&self) -> Result<(), OverlayHostError> {
            *self.attached.lock().await = None;
            self.detach_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn starts_hidden() {
        let controller = OverlayController::new(MockHost::new());
        assert!(!controller.is_showing());
        assert_eq!(controller.state().await, OverlayState::Hidden);
    }

    #[tokio::test]
    async fn show_small_attaches_and_records_geometry() {
        let controller = OverlayController::new(MockHost::new());
        assert!(controller.show_small().await.unwrap());
        assert!(controller.is_showing());
        assert_eq!(controller.state().await, OverlayState::ShowingSmall);
        assert_eq!(
            controller.geometry(OverlayView::Small).await,
            Some(ViewGeometry::new(48, 48))
        );
    }

    #[tokio::test]
    async fn show_is_idempotent() {
        let controller = OverlayController::new(MockHost::new());
        controller.show_small().await.unwrap();
        controller.show_small().await.unwrap();
        assert_eq!(controller.host.attach_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn at_most_one_view_attached() {
        let controller = OverlayController::new(MockHost::new());
        controller.show_small().await.unwrap();
        controller.show_big().await.unwrap();
        controller.show_small().await.unwrap();
        controller.hide().await.unwrap();
        controller.show_big().await.unwrap();

        assert!(!controller.host.double_attach.load(Ordering::SeqCst));
        assert_eq!(controller.state().await, OverlayState::ShowingBig);
    }

    #[tokio::test]
    async fn hide_is_idempotent() {
        let controller = OverlayController::new(MockHost::new());
        controller.show_small().await.unwrap();
        controller.hide().await.unwrap();
        controller.hide().await.unwrap();
        assert_eq!(controller.host.detach_calls.load(Ordering::SeqCst), 1);
        assert!(!controller.is_showing());
    }

    #[tokio::test]
    async fn permission_denied_fails_silently() {
        let controller = OverlayController::new(MockHost::denying());
        assert!(!controller.show_small().await.unwrap());
        assert!(!controller.is_showing());
        assert_eq!(controller.state().await, OverlayState::Hidden);
    }

    #[tokio::test]
    async fn back_returns_to_small_not_hidden() {
        let controller = OverlayController::new(MockHost::new());
        controller.show_small().await.unwrap();
        controller.handle(OverlayCommand::Expand).await.unwrap();
        assert_eq!(controller.state().await, OverlayState::ShowingBig);

        let effect = controller.handle(OverlayCommand::Back).await.unwrap();
        assert_eq!(effect, OverlayEffect::None);
        assert_eq!(controller.state().await, OverlayState::ShowingSmall);
    }

    #[tokio::test]
    async fn close_hides_and_requests_service_stop() {
        let controller = OverlayController::new(MockHost::new());
        controller.show_small().await.unwrap();
        controller.handle(OverlayCommand::Expand).await.unwrap();

        let effect = controller.handle(OverlayCommand::Close).await.unwrap();
        assert_eq!(effect, OverlayEffect::StopService);
        assert_eq!(controller.state().await, OverlayState::Hidden);
        assert!(!controller.is_showing());
    }

    #[tokio::test]
    async fn start_command_toggles_recording_from_big_view() {
        let controller = OverlayController::new(MockHost::new());
        controller.show_big().await.unwrap();

        let effect = controller.handle(OverlayCommand::Start).await.unwrap();
        assert_eq!(effect, OverlayEffect::ToggleRecording);
        assert_eq!(controller.state().await, OverlayState::ShowingBig);
    }

    #[tokio::test]
    async fn commands_ignored_while_hidden() {
        let controller = OverlayController::new(MockHost::new());
        for cmd in [
            OverlayCommand::Expand,
            OverlayCommand::Start,
            OverlayCommand::Back,
            OverlayCommand::Close,
        ] {
            assert_eq!(controller.handle(cmd).await.unwrap(), OverlayEffect::None);
        }
        assert_eq!(controller.host.attach_calls.load(Ordering::SeqCst), 0);
    }
}
