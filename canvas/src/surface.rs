//! The drawing interface the engine renders through, and its software implementation.
//!
//! [`DrawSurface`] is deliberately narrow: the engine needs exactly these
//! operations, so any rendering backend that provides them can be swapped in.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::color::Rgb;
use crate::consts::SHAPE_SIZE;
use crate::error::CanvasError;
use crate::input::{Point, Shape, StrokeWidth};
use crate::raster;
use crate::snapshot::Snapshot;

/// Operations the canvas engine performs on a square raster.
pub trait DrawSurface {
    /// Create a `side × side` surface filled with `background`.
    fn allocate(side: u32, background: Rgb) -> Self
    where
        Self: Sized;

    /// Current side length in pixels.
    fn side(&self) -> u32;

    /// The color the surface was last cleared to.
    fn background(&self) -> Rgb;

    /// Set the color and width used by subsequent [`DrawSurface::draw_line`] calls.
    fn set_stroke(&mut self, color: Rgb, width: StrokeWidth);

    /// Draw one round-capped segment with the current stroke.
    fn draw_line(&mut self, from: Point, to: Point);

    /// Stamp a filled fixed-size shape. Stroke width does not apply.
    fn fill_shape(&mut self, shape: Shape, at: Point, color: Rgb);

    /// Overwrite the whole surface with `background`.
    fn clear(&mut self, background: Rgb);

    /// Change the side length, scaling existing content to the new size.
    fn resize(&mut self, side: u32);

    /// Encode the current pixels without modifying them.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Encode`] if encoding fails.
    fn export(&self) -> Result<Snapshot, CanvasError>;
}

/// Software surface backed by an in-memory RGBA image.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    background: Rgb,
    stroke_color: Rgb,
    stroke_width: StrokeWidth,
}

impl RasterSurface {
    /// Read-only view of the pixels.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl DrawSurface for RasterSurface {
    fn allocate(side: u32, background: Rgb) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(side, side, background.to_rgba()),
            background,
            stroke_color: Rgb::default(),
            stroke_width: StrokeWidth::default(),
        }
    }

    fn side(&self) -> u32 {
        self.pixels.width()
    }

    fn background(&self) -> Rgb {
        self.background
    }

    fn set_stroke(&mut self, color: Rgb, width: StrokeWidth) {
        self.stroke_color = color;
        self.stroke_width = width;
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        raster::draw_segment(&mut self.pixels, from, to, self.stroke_color, self.stroke_width);
    }

    fn fill_shape(&mut self, shape: Shape, at: Point, color: Rgb) {
        match shape {
            Shape::Rectangle => raster::fill_square(&mut self.pixels, at, SHAPE_SIZE, color),
            Shape::Circle => raster::fill_circle(&mut self.pixels, at, SHAPE_SIZE, color),
        }
    }

    fn clear(&mut self, background: Rgb) {
        self.background = background;
        raster::fill(&mut self.pixels, background);
    }

    fn resize(&mut self, side: u32) {
        if side == self.side() {
            return;
        }
        self.pixels = imageops::resize(&self.pixels, side, side, FilterType::Nearest);
    }

    fn export(&self) -> Result<Snapshot, CanvasError> {
        Snapshot::encode(&self.pixels)
    }
}
