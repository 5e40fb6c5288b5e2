//! Source image buffers and extracted pixel regions.

use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::error::{CropError, CropResult};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A decoded source image: RGBA8 pixels at full resolution.
///
/// Decoding is the image-loading collaborator's job; the cropper only
/// reads rectangular slices out of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl SourceImage {
    /// Wrap an RGBA8 buffer, validating its length against the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> CropResult<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(CropError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Source width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Source height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA8 buffer, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Display geometry for a source image fitted to a fixed display width.
///
/// The image is shown at the full display width with its aspect ratio
/// preserved; the scale factors convert between display and source
/// coordinates in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayFit {
    /// On-screen width of the displayed image.
    pub width: f64,
    /// On-screen height, preserving the source aspect ratio.
    pub height: f64,
    /// displayed-width / source-width.
    pub scale_x: f64,
    /// displayed-height / source-height.
    pub scale_y: f64,
}

impl DisplayFit {
    /// Fit a source image to the given display width.
    pub fn new(image: &SourceImage, display_width: f64) -> Self {
        let ratio = image.height() as f64 / image.width() as f64;
        let height = ratio * display_width;
        Self {
            width: display_width,
            height,
            scale_x: display_width / image.width() as f64,
            scale_y: height / image.height() as f64,
        }
    }

    /// The displayed image extent as a rectangle at the origin.
    pub fn display_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Map an on-screen rectangle to source-pixel coordinates.
    pub fn display_to_source(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x0 / self.scale_x,
            rect.y0 / self.scale_y,
            rect.x1 / self.scale_x,
            rect.y1 / self.scale_y,
        )
    }

    /// Map a source-pixel rectangle to on-screen coordinates.
    pub fn source_to_display(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x0 * self.scale_x,
            rect.y0 * self.scale_y,
            rect.x1 * self.scale_x,
            rect.y1 * self.scale_y,
        )
    }
}

/// An extracted sub-rectangle of a source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRegion {
    /// RGBA8 pixel data, row-major.
    pub data: Vec<u8>,
    /// Region width in pixels.
    pub width: u32,
    /// Region height in pixels.
    pub height: u32,
}

impl PixelRegion {
    /// The pixel data as a base64 string for transport.
    pub fn data_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}
