//! Errors surfaced by the canvas engine.

use crate::engine::Lifecycle;

/// Errors produced by canvas operations.
///
/// Drawing itself never fails; these cover lifecycle misuse, rejected
/// stroke parameters, and image encoding at the export boundary.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// A buffer operation was attempted while the engine was not mounted.
    #[error("canvas is not ready (state: {state:?})")]
    NotReady { state: Lifecycle },

    /// `mount` was called on an engine that has already been mounted or disposed.
    #[error("canvas cannot be mounted from state {state:?}")]
    AlreadyMounted { state: Lifecycle },

    /// The color picker handed over something that is not `#rgb` / `#rrggbb`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Stroke width outside the selectable range.
    #[error("stroke width {0} out of range")]
    InvalidStrokeWidth(u32),

    /// PNG encoding of the buffer failed.
    #[error("snapshot encode failed: {0}")]
    Encode(String),

    /// A snapshot string could not be turned back into pixels.
    #[error("snapshot decode failed: {0}")]
    Decode(String),
}
