//! Overlay surface host port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::overlay::{OverlayView, ViewGeometry};

/// Overlay host errors
#[derive(Debug, Clone, Error)]
pub enum OverlayHostError {
    /// The window system refused to host an overlay surface. Show
    /// operations treat this as "fail silently": no overlay appears.
    #[error("Overlay permission denied by the window system")]
    PermissionDenied,

    #[error("Failed to attach overlay view: {0}")]
    AttachFailed(String),
}

/// Port for the window-system surface that hosts the floating views.
///
/// The host draws above all other applications and intercepts input only
/// within the attached view's bounds. Attaching a view while another is
/// attached replaces it; the host never shows two views at once.
#[async_trait]
pub trait OverlayHost: Send + Sync {
    /// Attach (or replace with) the given view, returning its geometry.
    async fn attach(&self, view: OverlayView) -> Result<ViewGeometry, OverlayHostError>;

    /// Detach whichever view is attached. No-op when nothing is attached.
    async fn detach(&self) -> Result<(), OverlayHostError>;
}
