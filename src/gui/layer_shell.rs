//! Wayland layer-shell based overlay views
//!
//! Uses smithay-client-toolkit to create a layer-shell surface that:
//! - Renders on the overlay layer (always on top)
//! - Has no keyboard interactivity
//! - Doesn't appear in taskbar
//! - Swaps between the small launcher dot and the big control panel

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use smithay_client_toolkit::{
    compositor::{CompositorHandler, CompositorState},
    delegate_compositor, delegate_layer, delegate_output, delegate_registry, delegate_shm,
    output::{OutputHandler, OutputState},
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
    shell::{
        wlr_layer::{
            Anchor, KeyboardInteractivity, Layer, LayerShell, LayerShellHandler, LayerSurface,
            LayerSurfaceConfigure,
        },
        WaylandSurface,
    },
    shm::{
        slot::{Buffer, SlotPool},
        Shm, ShmHandler,
    },
};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};
use tokio::sync::mpsc::UnboundedReceiver;
use wayland_client::{
    globals::registry_queue_init,
    protocol::{wl_output, wl_shm, wl_surface},
    Connection, QueueHandle,
};

use crate::domain::overlay::{OverlayView, ViewGeometry};
use crate::infrastructure::overlay::{OverlayFrame, BIG_GEOMETRY, SMALL_GEOMETRY};

/// Margin from screen edge
const MARGIN: i32 = 20;

/// Color helpers (Color::from_rgba8 is not const)
fn bg_color() -> Color {
    Color::from_rgba8(30, 30, 30, 220)
}

fn recording_color() -> Color {
    Color::from_rgba8(220, 50, 50, 255)
}

fn idle_color() -> Color {
    Color::from_rgba8(235, 235, 235, 255)
}

fn accent_color() -> Color {
    Color::from_rgba8(120, 170, 255, 255)
}

/// Error type for the layer-shell overlay
#[derive(Debug, thiserror::Error)]
pub enum LayerShellError {
    #[error("Failed to connect to Wayland: {0}")]
    Connection(#[from] wayland_client::ConnectError),
    #[error("Failed to initialize registry: {0}")]
    Registry(#[from] wayland_client::globals::GlobalError),
    #[error("Layer shell not available (compositor doesn't support wlr-layer-shell)")]
    LayerShellNotAvailable,
    #[error("Wayland dispatch error: {0}")]
    Dispatch(#[from] wayland_client::DispatchError),
    #[error("Wayland error: {0}")]
    Wayland(#[from] wayland_client::backend::WaylandError),
    #[error("Failed to create buffer pool: {0}")]
    BufferPool(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the overlay render loop.
///
/// Owns the Wayland connection for the process lifetime; frames arrive
/// from the overlay host and `recording` is sampled every loop turn so
/// the views reflect the live session state. Returns Err when Wayland or
/// layer-shell is not available (caller marks the overlay as denied).
pub fn run_overlay(
    frames: UnboundedReceiver<OverlayFrame>,
    recording: Arc<AtomicBool>,
) -> Result<(), LayerShellError> {
    // Bridge the async channel to mpsc for blocking receive
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut frames = frames;
        while let Some(frame) = frames.blocking_recv() {
            if tx.send(frame).is_err() {
                break;
            }
        }
    });

    // Connect to Wayland
    let conn = Connection::connect_to_env()?;
    let (globals, mut event_queue) = registry_queue_init(&conn)?;
    let qh = event_queue.handle();

    let mut app = OverlaySurface::new(&globals, &qh, rx, recording)?;

    // Initial roundtrip to get outputs
    event_queue.roundtrip(&mut app)?;

    // Main event loop
    loop {
        // Process any pending frames (non-blocking)
        app.process_frames();

        // Map/unmap/resize the surface to match the requested view
        app.update_visibility(&qh);

        // If surface is mapped and dirty, redraw
        if app.surface_mapped && app.dirty {
            if let Err(e) = app.draw() {
                eprintln!("Layer-shell draw error: {}", e);
            }
            app.dirty = false;
        }

        // Dispatch Wayland events (blocking with timeout)
        event_queue.flush()?;
        if let Some(guard) = event_queue.prepare_read() {
            // Use a short timeout so we can check for new frames
            let fd = guard.connection_fd();
            let mut poll_fds = [nix::poll::PollFd::new(fd, nix::poll::PollFlags::POLLIN)];
            let _ = nix::poll::poll(&mut poll_fds, nix::poll::PollTimeout::from(100u16));
            // Read events, ignoring WouldBlock errors
            match guard.read() {
                Ok(_) => {}
                Err(e) => {
                    if let wayland_client::backend::WaylandError::Io(ref io_err) = e {
                        if io_err.kind() != std::io::ErrorKind::WouldBlock {
                            return Err(LayerShellError::Wayland(e));
                        }
                    } else {
                        return Err(LayerShellError::Wayland(e));
                    }
                }
            }
        }
        event_queue.dispatch_pending(&mut app)?;
    }
}

/// Overlay surface state
struct OverlaySurface {
    registry_state: RegistryState,
    output_state: OutputState,
    compositor_state: CompositorState,
    shm: Shm,
    layer_shell: LayerShell,

    frames: mpsc::Receiver<OverlayFrame>,
    recording: Arc<AtomicBool>,

    // View requested by the service
    requested_view: Option<OverlayView>,
    // View the mapped surface is sized for
    mapped_view: Option<OverlayView>,
    last_recording: bool,

    // Surface state
    layer_surface: Option<LayerSurface>,
    surface_mapped: bool,
    dirty: bool,

    // Buffer management
    pool: SlotPool,
    buffer: Option<Buffer>,
}

impl OverlaySurface {
    fn new(
        globals: &wayland_client::globals::GlobalList,
        qh: &QueueHandle<Self>,
        frames: mpsc::Receiver<OverlayFrame>,
        recording: Arc<AtomicBool>,
    ) -> Result<Self, LayerShellError> {
        let registry_state = RegistryState::new(globals);
        let output_state = OutputState::new(globals, qh);
        let compositor_state =
            CompositorState::bind(globals, qh).map_err(|_| LayerShellError::LayerShellNotAvailable)?;
        let shm = Shm::bind(globals, qh).map_err(|_| LayerShellError::LayerShellNotAvailable)?;
        let layer_shell =
            LayerShell::bind(globals, qh).map_err(|_| LayerShellError::LayerShellNotAvailable)?;

        // Pool sized for the biggest view
        let pool = SlotPool::new((BIG_GEOMETRY.width * BIG_GEOMETRY.height * 4) as usize, &shm)
            .map_err(|e| LayerShellError::BufferPool(e.to_string()))?;

        Ok(Self {
            registry_state,
            output_state,
            compositor_state,
            shm,
            layer_shell,
            frames,
            recording,
            requested_view: None,
            mapped_view: None,
            last_recording: false,
            layer_surface: None,
            surface_mapped: false,
            dirty: false,
            pool,
            buffer: None,
        })
    }

    fn geometry(view: OverlayView) -> ViewGeometry {
        match view {
            OverlayView::Small => SMALL_GEOMETRY,
            OverlayView::Big => BIG_GEOMETRY,
        }
    }

    fn process_frames(&mut self) {
        while let Ok(frame) = self.frames.try_recv() {
            if self.requested_view != frame.view {
                self.requested_view = frame.view;
                self.dirty = true;
            }
        }

        // Repaint when the session state flips under a mapped view
        let recording = self.recording.load(Ordering::SeqCst);
        if recording != self.last_recording {
            self.last_recording = recording;
            self.dirty = true;
        }
    }

    fn update_visibility(&mut self, qh: &QueueHandle<Self>) {
        match self.requested_view {
            Some(view) => {
                // A view swap remaps the surface at the new size
                if self.mapped_view != Some(view) && self.layer_surface.is_some() {
                    self.destroy_surface();
                }
                if self.layer_surface.is_none() {
                    self.create_surface(qh, view);
                }
            }
            None => {
                if self.layer_surface.is_some() {
                    self.destroy_surface();
                }
            }
        }
    }

    fn create_surface(&mut self, qh: &QueueHandle<Self>, view: OverlayView) {
        let surface = self.compositor_state.create_surface(qh);

        let layer_surface = self.layer_shell.create_layer_surface(
            qh,
            surface,
            Layer::Overlay,
            Some("screenrec-overlay"),
            None, // Use default output
        );

        // Left edge, vertically centered
        let geometry = Self::geometry(view);
        layer_surface.set_anchor(Anchor::LEFT);
        layer_surface.set_margin(0, 0, 0, MARGIN);
        layer_surface.set_size(geometry.width, geometry.height);

        // Pointer input only, no keyboard focus
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::None);

        // Don't reserve screen space
        layer_surface.set_exclusive_zone(-1);

        // Commit to apply configuration
        layer_surface.commit();

        self.layer_surface = Some(layer_surface);
        self.mapped_view = Some(view);
        self.dirty = true;
    }

    fn destroy_surface(&mut self) {
        if let Some(surface) = self.layer_surface.take() {
            drop(surface);
        }
        self.surface_mapped = false;
        self.mapped_view = None;
        self.buffer = None;
    }

    fn draw(&mut self) -> Result<(), LayerShellError> {
        let view = match self.mapped_view {
            Some(view) => view,
            None => return Ok(()),
        };
        let geometry = Self::geometry(view);

        // Render to pixmap first (before borrowing pool)
        let pixmap = self.render(view, geometry);

        let (buffer, canvas) = self
            .pool
            .create_buffer(
                geometry.width as i32,
                geometry.height as i32,
                (geometry.width * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .map_err(|e| LayerShellError::BufferPool(e.to_string()))?;

        // Copy pixmap data to buffer (convert RGBA to ARGB)
        let src = pixmap.data();
        for (i, chunk) in canvas.chunks_exact_mut(4).enumerate() {
            let si = i * 4;
            // tiny-skia uses RGBA, wayland expects ARGB (BGRA on little-endian)
            chunk[0] = src[si + 2]; // B
            chunk[1] = src[si + 1]; // G
            chunk[2] = src[si]; // R
            chunk[3] = src[si + 3]; // A
        }

        let layer_surface = match self.layer_surface.as_ref() {
            Some(layer_surface) => layer_surface,
            None => return Ok(()),
        };

        buffer
            .attach_to(layer_surface.wl_surface())
            .map_err(|e| LayerShellError::BufferPool(format!("Failed to attach buffer: {}", e)))?;

        layer_surface.wl_surface().damage_buffer(
            0,
            0,
            geometry.width as i32,
            geometry.height as i32,
        );
        layer_surface.commit();

        // Store buffer to keep it alive
        self.buffer = Some(buffer);

        Ok(())
    }

    fn render(&self, view: OverlayView, geometry: ViewGeometry) -> Pixmap {
        let width = geometry.width;
        let height = geometry.height;
        let mut pixmap = Pixmap::new(width, height).unwrap_or_else(|| Pixmap::new(1, 1).unwrap());
        pixmap.fill(Color::TRANSPARENT);

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color(bg_color());

        // Rounded background
        let radius = 8.0;
        if let Some(path) = rounded_rect(width as f32, height as f32, radius) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        let recording = self.last_recording;
        match view {
            OverlayView::Small => {
                // Single status dot
                paint.set_color(if recording {
                    recording_color()
                } else {
                    idle_color()
                });
                if let Some(path) = circle(width as f32 / 2.0, height as f32 / 2.0, 10.0) {
                    pixmap.fill_path(
                        &path,
                        &paint,
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
            OverlayView::Big => {
                self.render_big(&mut pixmap, width as f32, height as f32, recording);
            }
        }

        pixmap
    }

    fn render_big(&self, pixmap: &mut Pixmap, width: f32, height: f32, recording: bool) {
        let mut paint = Paint::default();
        paint.anti_alias = true;

        // Start/stop button: a circle while idle, a square while recording
        paint.set_color(recording_color());
        let cx = width * 0.25;
        let cy = height / 2.0;
        if recording {
            if let Some(rect) = Rect::from_xywh(cx - 10.0, cy - 10.0, 20.0, 20.0) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        } else if let Some(path) = circle(cx, cy, 12.0) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        // Back chevron
        paint.set_color(accent_color());
        let bx = width * 0.6;
        let mut pb = PathBuilder::new();
        pb.move_to(bx + 8.0, cy - 10.0);
        pb.line_to(bx, cy);
        pb.line_to(bx + 8.0, cy + 10.0);
        pb.line_to(bx + 12.0, cy + 10.0);
        pb.line_to(bx + 4.0, cy);
        pb.line_to(bx + 12.0, cy - 10.0);
        pb.close();
        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        // Close cross
        paint.set_color(idle_color());
        let xx = width * 0.85;
        let arm = 8.0;
        let thickness = 3.0;
        for flip in [1.0f32, -1.0] {
            let mut pb = PathBuilder::new();
            pb.move_to(xx - arm, cy - arm * flip);
            pb.line_to(xx - arm + thickness, cy - arm * flip);
            pb.line_to(xx + arm, cy + (arm - thickness) * flip);
            pb.line_to(xx + arm, cy + arm * flip);
            pb.line_to(xx + arm - thickness, cy + arm * flip);
            pb.line_to(xx - arm, cy - (arm - thickness) * flip);
            pb.close();
            if let Some(path) = pb.finish() {
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }
}

fn rounded_rect(width: f32, height: f32, radius: f32) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(radius, 0.0);
    pb.line_to(width - radius, 0.0);
    pb.quad_to(width, 0.0, width, radius);
    pb.line_to(width, height - radius);
    pb.quad_to(width, height, width - radius, height);
    pb.line_to(radius, height);
    pb.quad_to(0.0, height, 0.0, height - radius);
    pb.line_to(0.0, radius);
    pb.quad_to(0.0, 0.0, radius, 0.0);
    pb.close();
    pb.finish()
}

fn circle(cx: f32, cy: f32, radius: f32) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.push_circle(cx, cy, radius);
    pb.finish()
}

// SCTK delegate implementations

impl CompositorHandler for OverlaySurface {
    fn scale_factor_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_factor: i32,
    ) {
        self.dirty = true;
    }

    fn transform_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_transform: wl_output::Transform,
    ) {
        self.dirty = true;
    }

    fn frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _time: u32,
    ) {
        self.dirty = true;
    }

    fn surface_enter(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _output: &wl_output::WlOutput,
    ) {
    }

    fn surface_leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _output: &wl_output::WlOutput,
    ) {
    }
}

impl OutputHandler for OverlaySurface {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }

    fn update_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }

    fn output_destroyed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }
}

impl LayerShellHandler for OverlaySurface {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _layer: &LayerSurface) {
        self.destroy_surface();
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        layer: &LayerSurface,
        _configure: LayerSurfaceConfigure,
        _serial: u32,
    ) {
        // Surface is now configured and can be drawn to
        self.surface_mapped = true;
        self.dirty = true;

        // Acknowledge the configure
        layer.wl_surface().commit();
    }
}

impl ShmHandler for OverlaySurface {
    fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm
    }
}

impl ProvidesRegistryState for OverlaySurface {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    registry_handlers![OutputState];
}

delegate_compositor!(OverlaySurface);
delegate_output!(OverlaySurface);
delegate_shm!(OverlaySurface);
delegate_layer!(OverlaySurface);
delegate_registry!(OverlaySurface);
