use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use bayer_mosaic::pipeline::{self, MosaicParams};
use bayer_mosaic::{BlockSize, SensorGrid, image_io};

#[derive(Parser)]
#[command(name = "bayer_mosaic")]
#[command(about = "Simulate a Bayer color sensor by flattening an image into single-channel blocks")]
struct Args {
    /// Source image
    input: PathBuf,

    /// Destination image; format follows the extension
    output: PathBuf,

    /// Mosaic cell edge length in pixels
    #[arg(short, long)]
    block_size: usize,

    /// Scale the source to this width before sampling
    #[arg(short = 'w', long)]
    fit_width: Option<u32>,

    /// Process block rows in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Print the per-block means to stdout
    #[arg(long)]
    print_grid: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let block_size = BlockSize::new(args.block_size).context("invalid --block-size")?;
    let params = MosaicParams {
        block_size,
        parallel: args.parallel,
        fit_width: args.fit_width,
    };

    let source = image_io::load_image(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let (buffer, grid) = pipeline::process(&source, &params).context("mosaic pass failed")?;

    if args.print_grid {
        print_grid(&grid);
    }

    image_io::save_buffer(buffer, &args.output)
        .with_context(|| format!("failed to save {}", args.output.display()))?;
    Ok(())
}

fn print_grid(grid: &SensorGrid) {
    for row in grid.iter_rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|site| match site.mean {
                Some(mean) => format!("{}{:>3}", site.channel.name(), mean.round_ties_even() as u8),
                None => format!("{}  -", site.channel.name()),
            })
            .collect();
        println!("{}", cells.join(" "));
    }
}
