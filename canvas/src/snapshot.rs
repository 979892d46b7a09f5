//! Snapshots: immutable PNG data-URI exports of the canvas buffer.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageFormat, RgbaImage};

use crate::consts::PNG_DATA_URI_PREFIX;
use crate::error::CanvasError;

/// One export of the canvas at a single point in time.
///
/// The encoded string is fixed at construction; a snapshot never observes
/// later drawing.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    data_uri: String,
}

impl Snapshot {
    /// Encode an RGBA buffer as a PNG data URI.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Encode`] if the PNG encoder rejects the buffer.
    pub fn encode(img: &RgbaImage) -> Result<Self, CanvasError> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)
            .map_err(|e| CanvasError::Encode(e.to_string()))?;
        let mut data_uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.len() * 4 / 3 + 4);
        data_uri.push_str(PNG_DATA_URI_PREFIX);
        STANDARD.encode_string(&png, &mut data_uri);
        Ok(Self { width: img.width(), height: img.height(), data_uri })
    }

    /// Wrap an existing data URI without validating it.
    ///
    /// Used by callers that received a snapshot over some other channel;
    /// [`Snapshot::decode`] reports whether it is usable.
    #[must_use]
    pub fn from_data_uri(width: u32, height: u32, data_uri: String) -> Self {
        Self { width, height, data_uri }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The `data:image/png;base64,...` string sent to the endpoint.
    #[must_use]
    pub fn as_data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Consume the snapshot, yielding the data URI.
    #[must_use]
    pub fn into_data_uri(self) -> String {
        self.data_uri
    }

    /// The raw PNG file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Decode`] if the URI is not a base64 PNG data URI.
    pub fn png_bytes(&self) -> Result<Vec<u8>, CanvasError> {
        let payload = self
            .data_uri
            .strip_prefix(PNG_DATA_URI_PREFIX)
            .ok_or_else(|| CanvasError::Decode("missing PNG data URI prefix".into()))?;
        STANDARD.decode(payload).map_err(|e| CanvasError::Decode(e.to_string()))
    }

    /// Decode back into pixels.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Decode`] if the payload is not a valid PNG.
    pub fn decode(&self) -> Result<RgbaImage, CanvasError> {
        let png = self.png_bytes()?;
        let img = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .map_err(|e| CanvasError::Decode(e.to_string()))?;
        Ok(img.to_rgba8())
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_uri_len", &self.data_uri.len())
            .finish()
    }
}
