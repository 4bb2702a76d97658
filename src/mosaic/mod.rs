//! Bayer mosaic sampling.
//!
//! The image is divided into `B x B` blocks. Each block is assigned one color
//! channel by [`bayer::channel_at`], the mean of that channel over the block is
//! taken, and the block is rewritten as an opaque flat color carrying only that
//! mean. The other two color channels are zeroed, not interpolated.

pub mod average;

use rayon::prelude::*;

use crate::buffer::{self, BYTES_PER_PIXEL, PixelBuffer};
use crate::color::bayer;
use crate::color::channel::Channel;
use crate::error::MosaicError;

/// Edge length of one mosaic cell, in pixels. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSize(usize);

impl BlockSize {
    pub fn new(pixels: usize) -> Result<Self, MosaicError> {
        if pixels == 0 {
            return Err(MosaicError::InvalidBlockSize);
        }
        Ok(Self(pixels))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// One sampled block: the channel it represents and the mean read for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSite {
    pub channel: Channel,
    /// `None` when the block had no in-bounds pixels and was skipped.
    pub mean: Option<f64>,
}

/// Per-block readings from one render pass, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorGrid {
    rows: usize,
    cols: usize,
    sites: Vec<SensorSite>,
}

impl SensorGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&SensorSite> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.sites.get(row * self.cols + col)
    }

    /// Iterate block rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[SensorSite]> {
        self.sites.chunks(self.cols.max(1))
    }
}

/// Apply the mosaic to `image` in place, one block row after another.
///
/// Fails with [`MosaicError::OutOfRange`] only on inconsistent geometry;
/// blocks with no in-bounds pixels are skipped.
pub fn render(image: &mut PixelBuffer, block_size: BlockSize) -> Result<SensorGrid, MosaicError> {
    let width = image.width();
    let band_len = band_len(width, block_size);
    let rows = image
        .as_bytes_mut()
        .chunks_mut(band_len)
        .enumerate()
        .map(|(block_row, band)| render_band(band, width, block_row, block_size))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(assemble(image, block_size, rows))
}

/// Same transformation as [`render`], with block rows processed on the
/// rayon thread pool. Each worker owns a disjoint band of whole block rows.
pub fn render_parallel(
    image: &mut PixelBuffer,
    block_size: BlockSize,
) -> Result<SensorGrid, MosaicError> {
    let width = image.width();
    let band_len = band_len(width, block_size);
    let rows = image
        .as_bytes_mut()
        .par_chunks_mut(band_len)
        .enumerate()
        .map(|(block_row, band)| render_band(band, width, block_row, block_size))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(assemble(image, block_size, rows))
}

/// Bytes in one band of `block_size` pixel rows.
fn band_len(width: usize, block_size: BlockSize) -> usize {
    width
        .saturating_mul(BYTES_PER_PIXEL)
        .saturating_mul(block_size.get())
        .max(BYTES_PER_PIXEL)
}

/// Sample and rewrite every block in one band. Coordinates are band-local;
/// `block_row` only selects the Bayer row.
fn render_band(
    band: &mut [u8],
    width: usize,
    block_row: usize,
    block_size: BlockSize,
) -> Result<Vec<SensorSite>, MosaicError> {
    let size = block_size.get();
    let band_height = buffer::rows_in(band, width);
    let mut sites = Vec::with_capacity(width.div_ceil(size));

    for block_col in 0..width.div_ceil(size) {
        let x0 = block_col * size;
        let channel = bayer::channel_at(block_col, block_row);

        let mean = match average::average_channel(band, width, x0, 0, size, channel) {
            Ok(mean) => mean,
            Err(MosaicError::EmptyRegion { .. }) => {
                log::trace!("skipping empty block ({block_col}, {block_row})");
                sites.push(SensorSite { channel, mean: None });
                continue;
            }
            Err(e) => return Err(e),
        };

        let rgba = channel.isolate(mean.round_ties_even().clamp(0.0, 255.0) as u8);
        let x_end = x0.saturating_add(size).min(width);
        for y in 0..band_height.min(size) {
            for x in x0..x_end {
                buffer::write_pixel(band, width, x, y, rgba)?;
            }
        }

        sites.push(SensorSite {
            channel,
            mean: Some(mean),
        });
    }

    Ok(sites)
}

fn assemble(image: &PixelBuffer, block_size: BlockSize, rows: Vec<Vec<SensorSite>>) -> SensorGrid {
    let cols = image.width().div_ceil(block_size.get());
    log::debug!(
        "{} mosaic: {}x{} blocks of {}px over {}x{} image",
        bayer::PATTERN_NAME,
        cols,
        rows.len(),
        block_size.get(),
        image.width(),
        image.height(),
    );
    SensorGrid {
        rows: rows.len(),
        cols,
        sites: rows.into_iter().flatten().collect(),
    }
}
