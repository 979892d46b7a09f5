//! Pixel primitives for the software surface.
//!
//! All coordinates are snapped to the pixel grid with `floor` before any
//! coverage test, so output depends only on the integer pixel positions of
//! the inputs. Every primitive clips against the image bounds and writes
//! opaque pixels (no blending), which keeps exports deterministic.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use image::RgbaImage;

use crate::color::Rgb;
use crate::input::{Point, StrokeWidth};

/// Half-open pixel rectangle `[x0, x1) × [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelRect {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl PixelRect {
    /// Intersect with the image; `None` when nothing is left.
    fn clip(self, width: u32, height: u32) -> Option<Self> {
        let clipped = Self {
            x0: self.x0.max(0),
            y0: self.y0.max(0),
            x1: self.x1.min(i64::from(width)),
            y1: self.y1.min(i64::from(height)),
        };
        (clipped.x0 < clipped.x1 && clipped.y0 < clipped.y1).then_some(clipped)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn snap(p: Point) -> (i64, i64) {
    (p.x.floor() as i64, p.y.floor() as i64)
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn fill_where(img: &mut RgbaImage, rect: PixelRect, color: Rgb, covered: impl Fn(i64, i64) -> bool) {
    let Some(clip) = rect.clip(img.width(), img.height()) else {
        return;
    };
    let rgba = color.to_rgba();
    for y in clip.y0..clip.y1 {
        for x in clip.x0..clip.x1 {
            if covered(x, y) {
                img.put_pixel(x as u32, y as u32, rgba);
            }
        }
    }
}

/// Overwrite every pixel with `color`.
pub fn fill(img: &mut RgbaImage, color: Rgb) {
    let rgba = color.to_rgba();
    for px in img.pixels_mut() {
        *px = rgba;
    }
}

/// Draw a round-capped line segment of the given width.
///
/// A pixel is covered when its grid position lies within `width / 2` of the
/// segment. A zero-length segment draws a single round dot.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_segment(img: &mut RgbaImage, from: Point, to: Point, color: Rgb, width: StrokeWidth) {
    let start = snap(from);
    let end = snap(to);
    let radius = f64::from(width.get()) / 2.0;
    let pad = radius.ceil() as i64;
    let bounds = PixelRect {
        x0: start.0.min(end.0).saturating_sub(pad),
        y0: start.1.min(end.1).saturating_sub(pad),
        x1: start.0.max(end.0).saturating_add(pad).saturating_add(1),
        y1: start.1.max(end.1).saturating_add(pad).saturating_add(1),
    };
    let radius_sq = radius * radius;
    fill_where(img, bounds, color, |x, y| point_segment_distance_sq((x, y), start, end) <= radius_sq);
}

/// Fill a `size × size` square whose top-left pixel is at `top_left`.
pub fn fill_square(img: &mut RgbaImage, top_left: Point, size: u32, color: Rgb) {
    let (x0, y0) = snap(top_left);
    let bounds = PixelRect {
        x0,
        y0,
        x1: x0.saturating_add(i64::from(size)),
        y1: y0.saturating_add(i64::from(size)),
    };
    fill_where(img, bounds, color, |_, _| true);
}

/// Fill a circle of the given diameter centered on `center`.
///
/// Coverage is sampled at pixel centers, so an even diameter produces a mark
/// exactly `diameter` pixels across in both directions.
#[allow(clippy::cast_precision_loss)]
pub fn fill_circle(img: &mut RgbaImage, center: Point, diameter: u32, color: Rgb) {
    let (cx, cy) = snap(center);
    let radius = f64::from(diameter) / 2.0;
    let reach = i64::from(diameter.div_ceil(2));
    let bounds = PixelRect {
        x0: cx.saturating_sub(reach),
        y0: cy.saturating_sub(reach),
        x1: cx.saturating_add(reach),
        y1: cy.saturating_add(reach),
    };
    let radius_sq = radius * radius;
    fill_where(img, bounds, color, |x, y| {
        let dx = (x - cx) as f64 + 0.5;
        let dy = (y - cy) as f64 + 0.5;
        dx * dx + dy * dy <= radius_sq
    });
}

#[allow(clippy::cast_precision_loss)]
fn point_segment_distance_sq(point: (i64, i64), start: (i64, i64), end: (i64, i64)) -> f64 {
    let (px, py) = (point.0 as f64, point.1 as f64);
    let (x0, y0) = (start.0 as f64, start.1 as f64);
    let (x1, y1) = (end.0 as f64, end.1 as f64);
    let (vx, vy) = (x1 - x0, y1 - y0);
    let (wx, wy) = (px - x0, py - y0);
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f64::EPSILON {
        return wx * wx + wy * wy;
    }
    let t = ((wx * vx + wy * vy) / len_sq).clamp(0.0, 1.0);
    let dx = px - (x0 + vx * t);
    let dy = py - (y0 + vy * t);
    dx * dx + dy * dy
}
