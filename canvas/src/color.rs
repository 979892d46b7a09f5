//! Stroke and background colors.
//!
//! The color picker hands over hex strings; everything past that boundary
//! works with [`Rgb`].

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;

use crate::error::CanvasError;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral gray where all three channels equal `level`.
    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Parse `#RGB` or `#RRGGBB`, as produced by the color picker.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidColor`] for anything else.
    pub fn from_hex(raw: &str) -> Result<Self, CanvasError> {
        parse_hex_rgb(raw)
            .map(|(r, g, b)| Self::new(r, g, b))
            .ok_or_else(|| CanvasError::InvalidColor(raw.to_owned()))
    }

    /// Canonical lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The color as an opaque RGBA pixel.
    #[must_use]
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, u8::MAX])
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = hex_channel(&hex[0..1].repeat(2))?;
            let g = hex_channel(&hex[1..2].repeat(2))?;
            let b = hex_channel(&hex[2..3].repeat(2))?;
            Some((r, g, b))
        }
        6 => {
            let r = hex_channel(&hex[0..2])?;
            let g = hex_channel(&hex[2..4])?;
            let b = hex_channel(&hex[4..6])?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn hex_channel(digits: &str) -> Option<u8> {
    u8::from_str_radix(digits, 16).ok()
}
