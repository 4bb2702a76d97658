use super::channel::Channel;

/// Name the mosaic is known by. The tile actually sampled starts with blue
/// at the origin (`[[B, G], [G, R]]`), which is the BGGR ordering.
pub const PATTERN_NAME: &str = "RGGB";

/// Returns the color channel sampled by the block at grid position
/// (`block_col`, `block_row`).
///
/// Even rows alternate B G, odd rows alternate G R.
pub fn channel_at(block_col: usize, block_row: usize) -> Channel {
    match (block_col % 2, block_row % 2) {
        (0, 0) => Channel::Blue,
        (1, 0) => Channel::Green,
        (0, 1) => Channel::Green,
        (1, 1) => Channel::Red,
        _ => unreachable!(),
    }
}
