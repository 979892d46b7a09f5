//! Shared numeric constants for the canvas crate.

// ── Buffer ──────────────────────────────────────────────────────

/// Upper bound on the canvas side length in logical pixels.
pub const MAX_CANVAS_SIDE: u32 = 400;

/// Lower bound on the canvas side length; a zero-width container still gets a buffer.
pub const MIN_CANVAS_SIDE: u32 = 1;

// ── Stroke ──────────────────────────────────────────────────────

/// Thinnest selectable brush.
pub const MIN_STROKE_WIDTH: u32 = 1;

/// Thickest selectable brush.
pub const MAX_STROKE_WIDTH: u32 = 10;

/// Brush width before the user touches the slider.
pub const DEFAULT_STROKE_WIDTH: u32 = 4;

// ── Shapes ──────────────────────────────────────────────────────

/// Edge length of a stamped rectangle or circle, independent of brush width.
pub const SHAPE_SIZE: u32 = 50;

// ── Background ──────────────────────────────────────────────────

/// Gray level of the light-theme canvas background.
pub const LIGHT_BACKGROUND_LEVEL: u8 = 255;

/// Gray level of the dark-theme canvas background.
pub const DARK_BACKGROUND_LEVEL: u8 = 30;

// ── Export ──────────────────────────────────────────────────────

/// Prefix of every exported snapshot.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";
