use thiserror::Error;

/// Errors produced by the mosaic core and the image shim around it.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// A coordinate or its byte offsets fall outside the buffer.
    #[error("pixel ({x}, {y}) is outside a {width}x{height} buffer")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// A requested block average covers no in-bounds pixels.
    #[error("block at ({x}, {y}) contains no in-bounds pixels")]
    EmptyRegion { x: usize, y: usize },
    /// Block size must be at least one pixel.
    #[error("block size must be a positive integer")]
    InvalidBlockSize,
    /// Buffer length does not match `width * height * 4`.
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    /// Width or height is zero.
    #[error("image must have non-zero width and height")]
    EmptyImage,
    /// Dimensions cannot be represented by the image codec.
    #[error("{width}x{height} exceeds the encodable image size")]
    TooLarge { width: usize, height: usize },
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
