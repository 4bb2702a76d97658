use image::DynamicImage;

use crate::buffer::PixelBuffer;
use crate::error::MosaicError;
use crate::image_io;
use crate::mosaic::{self, BlockSize, SensorGrid};

/// Parameters for one mosaic pass. The block size has no default and must be
/// chosen by the caller.
#[derive(Debug, Clone)]
pub struct MosaicParams {
    pub block_size: BlockSize,
    /// Process block rows on the rayon pool.
    pub parallel: bool,
    /// Scale the source to this width before sampling.
    pub fit_width: Option<u32>,
}

impl MosaicParams {
    pub fn new(block_size: BlockSize) -> Self {
        Self {
            block_size,
            parallel: false,
            fit_width: None,
        }
    }
}

/// Render a buffer in place with the configured strategy.
pub fn render(buffer: &mut PixelBuffer, params: &MosaicParams) -> Result<SensorGrid, MosaicError> {
    if params.parallel {
        mosaic::render_parallel(buffer, params.block_size)
    } else {
        mosaic::render(buffer, params.block_size)
    }
}

/// Run the full pass on a decoded image.
/// Returns the rendered RGBA buffer and the per-block readings.
pub fn process(
    source: &DynamicImage,
    params: &MosaicParams,
) -> Result<(PixelBuffer, SensorGrid), MosaicError> {
    // Step 1: Optional resize
    let scaled;
    let source = match params.fit_width {
        Some(width) => {
            scaled = image_io::fit_to_width(source, width);
            &scaled
        }
        None => source,
    };

    // Step 2: Decode to RGBA
    let mut buffer = image_io::to_pixel_buffer(source)?;

    // Step 3: Sample the mosaic
    let start = std::time::Instant::now();
    let grid = render(&mut buffer, params)?;
    log::info!(
        "rendered {}x{} in {:.2} ms",
        buffer.width(),
        buffer.height(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok((buffer, grid))
}
