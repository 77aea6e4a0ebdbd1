use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur while sorting an image.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SortError {
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("mask is {actual:?}, image is {expected:?}")]
    MaskSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("sort angle must be finite, got {0}")]
    InvalidAngle(f64),

    #[error("could not allocate sorting buffers: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
