use crate::buffer;
use crate::color::channel::Channel;
use crate::error::MosaicError;

/// Mean of `channel` over the square `[x0, x0+size) x [y0, y0+size)`,
/// clipped to the buffer. Pixels outside the buffer are skipped.
///
/// Uses the cumulative update `avg += (v - avg) / (n + 1)` in row-major order.
pub fn average_channel(
    data: &[u8],
    width: usize,
    top_left_x: usize,
    top_left_y: usize,
    block_size: usize,
    channel: Channel,
) -> Result<f64, MosaicError> {
    let height = buffer::rows_in(data, width);
    let x_end = top_left_x.saturating_add(block_size).min(width);
    let y_end = top_left_y.saturating_add(block_size).min(height);

    let mut cumulative_average = 0.0f64;
    let mut n = 0usize;
    for y in top_left_y..y_end {
        for x in top_left_x..x_end {
            let value = buffer::read_sample(data, width, x, y, channel)? as f64;
            cumulative_average += (value - cumulative_average) / (n + 1) as f64;
            n += 1;
        }
    }

    if n == 0 {
        return Err(MosaicError::EmptyRegion {
            x: top_left_x,
            y: top_left_y,
        });
    }
    Ok(cumulative_average)
}
