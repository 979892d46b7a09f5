//! The canvas engine: lifecycle, stroke parameters, and input handling.
//!
//! [`Engine`] owns the drawing surface and is the only thing that mutates it.
//! Hosts feed it input (directly or through an [`InputQueue`]) and act on the
//! returned [`Action`]s. All methods are synchronous; the engine is meant to
//! be driven from a single event loop.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::color::Rgb;
use crate::consts::{MAX_CANVAS_SIDE, MIN_CANVAS_SIDE};
use crate::error::CanvasError;
use crate::input::{Gesture, InputEvent, InputQueue, InputState, Point, StrokeParams, StrokeWidth, Tool};
use crate::snapshot::Snapshot;
use crate::surface::{DrawSurface, RasterSurface};
use crate::theme::Theme;

/// Side length of the square buffer for a container of the given width.
#[must_use]
pub fn canvas_side(container_width: u32) -> u32 {
    container_width.clamp(MIN_CANVAS_SIDE, MAX_CANVAS_SIDE)
}

/// Where the engine is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, no buffer yet.
    Uninitialized,
    /// Buffer allocated; drawing allowed.
    Ready,
    /// Torn down; every further buffer operation is rejected.
    Disposed,
}

/// Requests returned from input handlers for the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The buffer changed and should be presented.
    RenderNeeded,
    /// The host must cancel the platform's default handling (scroll, zoom)
    /// for the touch event that produced this action.
    SuppressDefault,
    /// A snapshot was exported in response to [`InputEvent::Submit`].
    SnapshotReady(Snapshot),
}

/// Result of [`Engine::drain`].
#[derive(Debug, Default)]
pub struct Drained {
    /// Actions from every event applied successfully, in order.
    pub actions: Vec<Action>,
    /// The error that stopped the drain, if any.
    pub error: Option<CanvasError>,
}

impl Drained {
    /// Snapshots exported by `Submit` events, in order.
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.actions.iter().filter_map(|a| match a {
            Action::SnapshotReady(snapshot) => Some(snapshot),
            _ => None,
        })
    }
}

enum Slot<S> {
    Uninitialized,
    Ready(S),
    Disposed,
}

/// Canvas engine over a [`DrawSurface`] backend.
pub struct Engine<S = RasterSurface> {
    slot: Slot<S>,
    params: StrokeParams,
    theme: Theme,
    input: InputState,
}

impl Engine<RasterSurface> {
    /// Create an unmounted engine backed by the software rasterizer.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self::with_backend(theme)
    }
}

impl Default for Engine<RasterSurface> {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl<S: DrawSurface> Engine<S> {
    /// Create an unmounted engine for an arbitrary backend.
    #[must_use]
    pub fn with_backend(theme: Theme) -> Self {
        Self { slot: Slot::Uninitialized, params: StrokeParams::default(), theme, input: InputState::default() }
    }

    // --- Lifecycle ---

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        match self.slot {
            Slot::Uninitialized => Lifecycle::Uninitialized,
            Slot::Ready(_) => Lifecycle::Ready,
            Slot::Disposed => Lifecycle::Disposed,
        }
    }

    /// Allocate the buffer for the given container width and fill it with
    /// the current theme's background.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::AlreadyMounted`] unless the engine is uninitialized.
    pub fn mount(&mut self, container_width: u32) -> Result<(), CanvasError> {
        if !matches!(self.slot, Slot::Uninitialized) {
            return Err(CanvasError::AlreadyMounted { state: self.lifecycle() });
        }
        let side = canvas_side(container_width);
        let background = self.theme.background();
        debug!(side, %background, "canvas mounted");
        self.slot = Slot::Ready(S::allocate(side, background));
        Ok(())
    }

    /// Release the buffer. Idempotent.
    pub fn dispose(&mut self) {
        if !matches!(self.slot, Slot::Disposed) {
            debug!(from = ?self.lifecycle(), "canvas disposed");
        }
        self.slot = Slot::Disposed;
        self.input = InputState::default();
    }

    // --- Stroke parameters ---

    #[must_use]
    pub fn params(&self) -> StrokeParams {
        self.params
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Make `tool` the single active tool.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] after disposal.
    pub fn select_tool(&mut self, tool: Tool) -> Result<(), CanvasError> {
        self.ensure_alive()?;
        self.params.tool = tool;
        Ok(())
    }

    /// Apply a color-picker change.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidColor`] for a malformed hex string, or
    /// [`CanvasError::NotReady`] after disposal.
    pub fn set_color(&mut self, hex: &str) -> Result<(), CanvasError> {
        self.ensure_alive()?;
        self.params.color = Rgb::from_hex(hex)?;
        Ok(())
    }

    /// Apply a brush-size change.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidStrokeWidth`] outside `1..=10`, or
    /// [`CanvasError::NotReady`] after disposal.
    pub fn set_stroke_width(&mut self, width: u32) -> Result<(), CanvasError> {
        self.ensure_alive()?;
        self.params.width = StrokeWidth::new(width)?;
        Ok(())
    }

    /// Switch the theme flag. The buffer is not repainted; the new background
    /// applies from the next reset.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] after disposal.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), CanvasError> {
        self.ensure_alive()?;
        self.theme = theme;
        if let Ok(current) = self.background() {
            debug!(%current, next = %theme.background(), "theme changed");
        }
        Ok(())
    }

    // --- Pointer input ---

    /// Button pressed: stamps a shape, or starts a freehand stroke with a dot.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted.
    pub fn pointer_down(&mut self, at: Point) -> Result<Vec<Action>, CanvasError> {
        self.press(at, StreamKind::Pointer)
    }

    /// Pointer moved. Draws a segment only while pressed with the freehand tool.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted.
    pub fn pointer_move(&mut self, to: Point) -> Result<Vec<Action>, CanvasError> {
        self.drag(to, StreamKind::Pointer)
    }

    /// Button released.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted.
    pub fn pointer_up(&mut self) -> Result<Vec<Action>, CanvasError> {
        self.release(StreamKind::Pointer)
    }

    // --- Touch input ---

    /// Finger down. Same drawing semantics as [`Engine::pointer_down`], tracked
    /// separately, and always asks the host to suppress default handling.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted.
    pub fn touch_start(&mut self, at: Point) -> Result<Vec<Action>, CanvasError> {
        self.press(at, StreamKind::Touch)
    }

    /// Finger moved.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted.
    pub fn touch_move(&mut self, to: Point) -> Result<Vec<Action>, CanvasError> {
        self.drag(to, StreamKind::Touch)
    }

    /// Finger lifted.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted.
    pub fn touch_end(&mut self) -> Result<Vec<Action>, CanvasError> {
        self.release(StreamKind::Touch)
    }

    // --- Buffer operations ---

    /// Clear the buffer to the current theme's background. Stroke parameters
    /// are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted.
    pub fn reset(&mut self) -> Result<Vec<Action>, CanvasError> {
        let background = self.theme.background();
        let surface = self.surface_mut()?;
        let previous = surface.background();
        surface.clear(background);
        debug!(%previous, %background, "canvas reset");
        Ok(vec![Action::RenderNeeded])
    }

    /// Follow a container size change, scaling the existing drawing.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted.
    pub fn resize(&mut self, container_width: u32) -> Result<Vec<Action>, CanvasError> {
        let side = canvas_side(container_width);
        let surface = self.surface_mut()?;
        let old = surface.side();
        if old == side {
            return Ok(Vec::new());
        }
        surface.resize(side);
        debug!(old, new = side, "canvas resized");
        Ok(vec![Action::RenderNeeded])
    }

    /// Encode the current buffer. Never modifies it.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted, or
    /// [`CanvasError::Encode`] if encoding fails.
    pub fn export(&self) -> Result<Snapshot, CanvasError> {
        let snapshot = self.surface()?.export()?;
        debug!(width = snapshot.width(), bytes = snapshot.as_data_uri().len(), "canvas exported");
        Ok(snapshot)
    }

    /// The color the buffer was last cleared to. Lags the theme until the
    /// next reset.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted.
    pub fn background(&self) -> Result<Rgb, CanvasError> {
        Ok(self.surface()?.background())
    }

    /// The mounted surface, for presentation.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NotReady`] unless mounted.
    pub fn surface(&self) -> Result<&S, CanvasError> {
        match &self.slot {
            Slot::Ready(surface) => Ok(surface),
            _ => Err(CanvasError::NotReady { state: self.lifecycle() }),
        }
    }

    // --- Event dispatch ---

    /// Apply a single input event.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the event maps to.
    pub fn handle(&mut self, event: InputEvent) -> Result<Vec<Action>, CanvasError> {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::TouchStart { x, y } => self.touch_start(Point::new(x, y)),
            InputEvent::TouchMove { x, y } => self.touch_move(Point::new(x, y)),
            InputEvent::TouchEnd => self.touch_end(),
            InputEvent::SelectTool { tool } => self.select_tool(tool).map(|()| Vec::new()),
            InputEvent::PickColor { hex } => self.set_color(&hex).map(|()| Vec::new()),
            InputEvent::SetStrokeWidth { width } => self.set_stroke_width(width).map(|()| Vec::new()),
            InputEvent::SetTheme { theme } => self.set_theme(theme).map(|()| Vec::new()),
            InputEvent::Reset => self.reset(),
            InputEvent::Resize { container_width } => self.resize(container_width),
            InputEvent::Submit => Ok(vec![Action::SnapshotReady(self.export()?)]),
        }
    }

    /// Apply queued events in order until the queue is empty or an event fails.
    ///
    /// Actions from events applied before a failure are returned alongside
    /// the error, since those events have already changed the buffer. The
    /// failing event is consumed; later events stay queued.
    #[must_use]
    pub fn drain(&mut self, queue: &mut InputQueue) -> Drained {
        let mut drained = Drained::default();
        while let Some(event) = queue.pop() {
            match self.handle(event) {
                Ok(actions) => drained.actions.extend(actions),
                Err(e) => {
                    debug!(error = %e, remaining = queue.len(), "drain halted");
                    drained.error = Some(e);
                    break;
                }
            }
        }
        drained
    }

    // --- Internals ---

    fn ensure_alive(&self) -> Result<(), CanvasError> {
        match self.slot {
            Slot::Disposed => Err(CanvasError::NotReady { state: Lifecycle::Disposed }),
            _ => Ok(()),
        }
    }

    fn surface_mut(&mut self) -> Result<&mut S, CanvasError> {
        let state = self.lifecycle();
        match &mut self.slot {
            Slot::Ready(surface) => Ok(surface),
            _ => Err(CanvasError::NotReady { state }),
        }
    }

    fn gesture_mut(&mut self, kind: StreamKind) -> &mut Gesture {
        match kind {
            StreamKind::Pointer => &mut self.input.pointer,
            StreamKind::Touch => &mut self.input.touch,
        }
    }

    fn press(&mut self, at: Point, kind: StreamKind) -> Result<Vec<Action>, CanvasError> {
        let params = self.params;
        let surface = self.surface_mut()?;
        let mut actions = kind.prelude();
        if !is_finite(at) {
            debug!(?at, "ignoring non-finite press");
            return Ok(actions);
        }
        match params.tool.shape() {
            Some(shape) => surface.fill_shape(shape, at, params.color),
            None => {
                surface.set_stroke(params.color, params.width);
                surface.draw_line(at, at);
            }
        }
        *self.gesture_mut(kind) = Gesture::Pressed { last: at };
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    fn drag(&mut self, to: Point, kind: StreamKind) -> Result<Vec<Action>, CanvasError> {
        self.surface()?;
        let mut actions = kind.prelude();
        if !is_finite(to) {
            debug!(?to, "ignoring non-finite move");
            return Ok(actions);
        }
        let Some(from) = self.gesture_mut(kind).advance(to) else {
            return Ok(actions);
        };
        let params = self.params;
        if params.tool == Tool::Freehand {
            let surface = self.surface_mut()?;
            surface.set_stroke(params.color, params.width);
            surface.draw_line(from, to);
            actions.push(Action::RenderNeeded);
        }
        Ok(actions)
    }

    fn release(&mut self, kind: StreamKind) -> Result<Vec<Action>, CanvasError> {
        self.surface()?;
        *self.gesture_mut(kind) = Gesture::Idle;
        Ok(kind.prelude())
    }
}

#[derive(Debug, Clone, Copy)]
enum StreamKind {
    Pointer,
    Touch,
}

impl StreamKind {
    /// Actions every event of this stream produces, before any drawing.
    fn prelude(self) -> Vec<Action> {
        match self {
            Self::Pointer => Vec::new(),
            Self::Touch => vec![Action::SuppressDefault],
        }
    }
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
