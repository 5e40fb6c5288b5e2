//! Cropper error types.

use thiserror::Error;

/// Errors surfaced by the cropping control.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CropError {
    /// Extraction was invoked before a source image was attached.
    #[error("extraction requested before image ready")]
    ImageNotReady,
    /// The crop rectangle covers no source pixels.
    #[error("crop region has zero area")]
    EmptyCropRegion,
    /// A pixel buffer does not match its stated dimensions.
    #[error("pixel buffer is {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Result type for cropping operations.
pub type CropResult<T> = Result<T, CropError>;
