//! Input model: tools, stroke parameters, input events, and gesture tracking.
//!
//! The host never mutates drawing state directly. It pushes [`InputEvent`]s
//! into an [`InputQueue`] and the engine drains the queue, so UI wiring stays
//! decoupled from the buffer. Pointer and touch streams are tracked by
//! separate [`Gesture`]s so a touch sequence never borrows the mouse's
//! previous sample (and vice versa).

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::{DEFAULT_STROKE_WIDTH, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use crate::error::CanvasError;
use crate::theme::Theme;

/// A position in canvas space (logical pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A filled shape that can be stamped onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Axis-aligned square whose top-left corner sits at the stamp point.
    Rectangle,
    /// Circle centered on the stamp point.
    Circle,
}

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Continuous line drawing (default).
    #[default]
    Freehand,
    /// Stamp a fixed-size filled square.
    Rectangle,
    /// Stamp a fixed-size filled circle.
    Circle,
}

impl Tool {
    /// The shape this tool stamps, or `None` for freehand.
    #[must_use]
    pub fn shape(self) -> Option<Shape> {
        match self {
            Self::Freehand => None,
            Self::Rectangle => Some(Shape::Rectangle),
            Self::Circle => Some(Shape::Circle),
        }
    }

    /// Whether this tool stamps a shape on discrete input.
    #[must_use]
    pub fn is_shape(self) -> bool {
        self.shape().is_some()
    }
}

/// Brush width in logical pixels, always within the selectable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrokeWidth(u32);

impl StrokeWidth {
    /// Validate a slider value.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidStrokeWidth`] outside `1..=10`.
    pub fn new(width: u32) -> Result<Self, CanvasError> {
        if (MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH).contains(&width) {
            Ok(Self(width))
        } else {
            Err(CanvasError::InvalidStrokeWidth(width))
        }
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for StrokeWidth {
    fn default() -> Self {
        Self(DEFAULT_STROKE_WIDTH)
    }
}

/// The triple governing how input is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrokeParams {
    pub color: Rgb,
    pub width: StrokeWidth,
    pub tool: Tool,
}

/// Everything the host can tell the canvas.
///
/// Serialized with an internal `type` tag so recorded sessions read as
/// `{"type": "pointer_down", "x": 10, "y": 20}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse/pen button pressed.
    PointerDown { x: f64, y: f64 },
    /// Mouse/pen moved (with or without the button held).
    PointerMove { x: f64, y: f64 },
    /// Mouse/pen button released.
    PointerUp,
    /// First finger touched the surface.
    TouchStart { x: f64, y: f64 },
    /// Finger moved on the surface.
    TouchMove { x: f64, y: f64 },
    /// Finger lifted or the touch was cancelled.
    TouchEnd,
    /// Toolbar tool selection.
    SelectTool { tool: Tool },
    /// Color picker change, as a hex string.
    PickColor { hex: String },
    /// Brush-size slider change.
    SetStrokeWidth { width: u32 },
    /// Host theme flag changed.
    SetTheme { theme: Theme },
    /// Reset button.
    Reset,
    /// Container resized.
    Resize { container_width: u32 },
    /// Submit button: export the current buffer.
    Submit,
}

/// FIFO of pending input events, filled by the host and drained by the engine.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event for the next drain.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Dequeue the oldest event.
    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Extend<InputEvent> for InputQueue {
    fn extend<I: IntoIterator<Item = InputEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

impl FromIterator<InputEvent> for InputQueue {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}

/// State of one input stream (pointer or touch) between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// Nothing pressed.
    #[default]
    Idle,
    /// Pressed; `last` is the previous sample, the start of the next segment.
    Pressed { last: Point },
}

impl Gesture {
    /// Record a new sample, returning the previous one if a press is active.
    pub fn advance(&mut self, to: Point) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Pressed { last } => Some(std::mem::replace(last, to)),
        }
    }

    #[must_use]
    pub fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed { .. })
    }
}

/// Gesture state for both input streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub pointer: Gesture,
    pub touch: Gesture,
}
