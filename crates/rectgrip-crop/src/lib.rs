//! Image-cropping control built on the rectangle interaction engine.
//!
//! A [`SourceImage`] is displayed scaled to a fixed width; the crop box
//! is dragged and resized over it through [`rectgrip_core`]'s engine,
//! and [`ImageCropper::extract`] copies the covered source pixels out
//! as a [`PixelRegion`].

pub mod cropper;
pub mod error;
pub mod image;

pub use cropper::{DEFAULT_CROP_SIZE, ImageCropper};
pub use error::{CropError, CropResult};
pub use image::{BYTES_PER_PIXEL, DisplayFit, PixelRegion, SourceImage};
