//! Flat RGBA pixel storage and coordinate addressing.
//!
//! The free functions work on any `(&[u8], width)` pair so the renderer can
//! address a horizontal band of a larger buffer with band-local coordinates.

use crate::color::channel::Channel;
use crate::error::MosaicError;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Byte offsets of the R, G, B, A samples of pixel `(x, y)` in a row-major
/// RGBA buffer `width` pixels wide. `None` if the offsets overflow `usize`.
pub fn indices_for(x: usize, y: usize, width: usize) -> Option<[usize; 4]> {
    let stride = width.checked_mul(BYTES_PER_PIXEL)?;
    let red = y
        .checked_mul(stride)?
        .checked_add(x.checked_mul(BYTES_PER_PIXEL)?)?;
    let alpha = red.checked_add(3)?;
    Some([red, red + 1, red + 2, alpha])
}

/// Number of whole rows in `data` for the given width.
/// A width whose row stride overflows holds no rows.
pub fn rows_in(data: &[u8], width: usize) -> usize {
    match width.checked_mul(BYTES_PER_PIXEL) {
        Some(stride) if stride > 0 => data.len() / stride,
        _ => 0,
    }
}

fn checked_indices(data: &[u8], width: usize, x: usize, y: usize) -> Result<[usize; 4], MosaicError> {
    let height = rows_in(data, width);
    match indices_for(x, y, width) {
        Some(idx) if x < width && y < height && idx[3] < data.len() => Ok(idx),
        _ => Err(MosaicError::OutOfRange { x, y, width, height }),
    }
}

/// Read the four samples of pixel `(x, y)`.
pub fn read_pixel(data: &[u8], width: usize, x: usize, y: usize) -> Result<[u8; 4], MosaicError> {
    let [r, g, b, a] = checked_indices(data, width, x, y)?;
    Ok([data[r], data[g], data[b], data[a]])
}

/// Read a single channel sample of pixel `(x, y)`.
pub fn read_sample(
    data: &[u8],
    width: usize,
    x: usize,
    y: usize,
    channel: Channel,
) -> Result<u8, MosaicError> {
    let idx = checked_indices(data, width, x, y)?;
    Ok(data[idx[channel.index()]])
}

/// Overwrite the four samples of pixel `(x, y)` in place.
pub fn write_pixel(
    data: &mut [u8],
    width: usize,
    x: usize,
    y: usize,
    rgba: [u8; 4],
) -> Result<(), MosaicError> {
    let idx = checked_indices(data, width, x, y)?;
    for (offset, value) in idx.into_iter().zip(rgba) {
        data[offset] = value;
    }
    Ok(())
}

/// An owned RGBA raster, row-major, `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, validating the geometry.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, MosaicError> {
        if width == 0 || height == 0 {
            return Err(MosaicError::EmptyImage);
        }
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .ok_or(MosaicError::BufferSizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() != expected {
            return Err(MosaicError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// A buffer with every pixel set to `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, MosaicError> {
        let pixels = width.checked_mul(height).ok_or(MosaicError::EmptyImage)?;
        Self::new(width, height, rgba.repeat(pixels))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn read_pixel(&self, x: usize, y: usize) -> Result<[u8; 4], MosaicError> {
        read_pixel(&self.data, self.width, x, y)
    }

    pub fn write_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) -> Result<(), MosaicError> {
        write_pixel(&mut self.data, self.width, x, y, rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_row_major_stride() {
        assert_eq!(indices_for(0, 0, 3), Some([0, 1, 2, 3]));
        assert_eq!(indices_for(2, 0, 3), Some([8, 9, 10, 11]));
        assert_eq!(indices_for(1, 1, 3), Some([16, 17, 18, 19]));
    }

    #[test]
    fn oversized_width_reports_out_of_range() {
        let width = usize::MAX / 2;
        assert_eq!(indices_for(0, 1, width), None);
        assert_eq!(rows_in(&[0u8; 4], width), 0);
        assert!(matches!(
            read_pixel(&[0u8; 4], width, 0, 0),
            Err(MosaicError::OutOfRange { x: 0, y: 0, height: 0, .. })
        ));
        let mut data = [7u8; 4];
        assert!(matches!(
            write_pixel(&mut data, width, 0, 0, [0; 4]),
            Err(MosaicError::OutOfRange { .. })
        ));
        assert!(matches!(
            read_sample(&data, usize::MAX, 0, 0, Channel::Red),
            Err(MosaicError::OutOfRange { .. })
        ));
        assert_eq!(data, [7; 4]);
    }

    #[test]
    fn read_write_roundtrip_single_pixel() {
        let mut buf = PixelBuffer::filled(2, 2, [0, 0, 0, 0]).unwrap();
        buf.write_pixel(1, 1, [1, 2, 3, 4]).unwrap();
        assert_eq!(buf.read_pixel(1, 1).unwrap(), [1, 2, 3, 4]);
        assert_eq!(buf.read_pixel(0, 1).unwrap(), [0, 0, 0, 0]);
        assert_eq!(&buf.as_bytes()[12..], &[1, 2, 3, 4]);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut buf = PixelBuffer::filled(2, 2, [9, 9, 9, 9]).unwrap();
        assert!(matches!(
            buf.read_pixel(2, 0),
            Err(MosaicError::OutOfRange { x: 2, y: 0, .. })
        ));
        assert!(matches!(
            buf.write_pixel(0, 2, [0; 4]),
            Err(MosaicError::OutOfRange { .. })
        ));
        assert!(matches!(
            read_sample(buf.as_bytes(), 2, 5, 5, Channel::Blue),
            Err(MosaicError::OutOfRange { .. })
        ));
        // Nothing was written by the failed call.
        assert!(buf.as_bytes().iter().all(|&v| v == 9));
    }

    #[test]
    fn geometry_is_validated() {
        assert!(matches!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(MosaicError::BufferSizeMismatch {
                expected: 16,
                actual: 15
            })
        ));
        assert!(matches!(
            PixelBuffer::new(0, 2, Vec::new()),
            Err(MosaicError::EmptyImage)
        ));
    }
}
