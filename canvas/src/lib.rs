//! Drawing surface engine for the sketch pad.
//!
//! The crate owns a square raster buffer and everything that mutates it:
//! freehand strokes, fixed-size shape stamps, reset, resize, and PNG export.
//! Hosts translate platform input into [`input::InputEvent`]s, hand them to
//! the [`engine::Engine`], and act on the returned [`engine::Action`]s
//! (present the buffer, suppress touch scrolling, forward a snapshot).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Lifecycle, stroke parameters, and input dispatch |
//! | [`surface`] | The [`surface::DrawSurface`] seam and its software implementation |
//! | [`raster`] | Pixel primitives: segments, squares, circles |
//! | [`input`] | Tools, stroke parameters, input events, and gesture tracking |
//! | [`snapshot`] | PNG data-URI exports |
//! | [`color`] | Hex color parsing |
//! | [`theme`] | Light/dark flag and background colors |
//! | [`error`] | [`error::CanvasError`] |
//! | [`consts`] | Shared numeric constants (canvas bounds, stroke range, shape size) |

pub mod color;
pub mod consts;
pub mod engine;
pub mod error;
pub mod input;
pub mod raster;
pub mod snapshot;
pub mod surface;
pub mod theme;

pub use color::Rgb;
pub use engine::{Action, Drained, Engine, Lifecycle};
pub use error::CanvasError;
pub use input::{InputEvent, InputQueue, Point, StrokeParams, StrokeWidth, Tool};
pub use snapshot::Snapshot;
pub use surface::{DrawSurface, RasterSurface};
pub use theme::Theme;
