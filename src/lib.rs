//! Bayer mosaic sensor simulation - library crate.
//!
//! Provides the block sampling core and the image I/O shim
//! used by the command-line binary.

pub mod buffer;
pub mod color;
pub mod error;
pub mod image_io;
pub mod mosaic;
pub mod pipeline;

pub use buffer::PixelBuffer;
pub use color::channel::Channel;
pub use error::MosaicError;
pub use mosaic::{BlockSize, SensorGrid, SensorSite};
