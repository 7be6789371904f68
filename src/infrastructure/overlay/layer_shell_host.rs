//! Overlay host bridging to the layer-shell render thread

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::application::ports::{OverlayHost, OverlayHostError};
use crate::domain::overlay::{OverlayView, ViewGeometry};

/// Pixel size of the small launcher dot
pub const SMALL_GEOMETRY: ViewGeometry = ViewGeometry::new(48, 48);

/// Pixel size of the big control panel
pub const BIG_GEOMETRY: ViewGeometry = ViewGeometry::new(200, 96);

/// One render instruction for the overlay surface thread.
/// `view: None` takes the surface down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayFrame {
    pub view: Option<OverlayView>,
}

impl OverlayFrame {
    pub const fn show(view: OverlayView) -> Self {
        Self { view: Some(view) }
    }

    pub const fn hide() -> Self {
        Self { view: None }
    }
}

/// Overlay host backed by a Wayland layer-shell surface.
///
/// Rendering happens on a dedicated thread that owns the Wayland
/// connection; this adapter only hands it frames. A compositor without
/// layer-shell support brings the render thread down, after which attach
/// reports `PermissionDenied` so the service keeps running without an
/// overlay.
pub struct LayerShellOverlayHost {
    frames: UnboundedSender<OverlayFrame>,
    gui_alive: Arc<AtomicBool>,
}

impl LayerShellOverlayHost {
    /// Bridge to a running render thread
    pub fn new(frames: UnboundedSender<OverlayFrame>, gui_alive: Arc<AtomicBool>) -> Self {
        Self { frames, gui_alive }
    }

    /// Geometry for a view as the render thread sizes it
    pub const fn geometry_for(view: OverlayView) -> ViewGeometry {
        match view {
            OverlayView::Small => SMALL_GEOMETRY,
            OverlayView::Big => BIG_GEOMETRY,
        }
    }
}

#[async_trait]
impl OverlayHost for LayerShellOverlayHost {
    async fn attach(&self, view: OverlayView) -> Result<ViewGeometry, OverlayHostError> {
        if !self.gui_alive.load(Ordering::SeqCst) {
            return Err(OverlayHostError::PermissionDenied);
        }
        self.frames
            .send(OverlayFrame::show(view))
            .map_err(|_| OverlayHostError::PermissionDenied)?;
        Ok(Self::geometry_for(view))
    }

    async fn detach(&self) -> Result<(), OverlayHostError> {
        // Losing the render thread mid-detach is not an error: the
        // surface is gone either way.
        let _ = self.frames.send(OverlayFrame::hide());
        Ok(())
    }
}
