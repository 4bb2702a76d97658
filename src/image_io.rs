use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use std::path::Path;

use crate::buffer::{BYTES_PER_PIXEL, PixelBuffer};
use crate::error::MosaicError;

pub fn load_image(path: &Path) -> Result<DynamicImage, MosaicError> {
    let img = image::open(path)?;
    log::info!(
        "loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Scale image to `target_width`, preserving aspect ratio.
/// Height is rounded and never drops below one pixel.
pub fn fit_to_width(img: &DynamicImage, target_width: u32) -> DynamicImage {
    let (iw, ih) = img.dimensions();
    if iw == target_width || iw == 0 || target_width == 0 {
        return img.clone();
    }
    let scale = target_width as f64 / iw as f64;
    let new_h = ((ih as f64 * scale).round() as u32).max(1);
    img.resize_exact(target_width, new_h, image::imageops::FilterType::Lanczos3)
}

/// Decode to 8-bit RGBA and wrap it for the mosaic core.
pub fn to_pixel_buffer(img: &DynamicImage) -> Result<PixelBuffer, MosaicError> {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    PixelBuffer::new(w as usize, h as usize, rgba.into_raw())
}

/// Encode a buffer to `path`; the format follows the file extension.
/// Formats without an alpha channel receive the RGB samples only.
pub fn save_buffer(buffer: PixelBuffer, path: &Path) -> Result<(), MosaicError> {
    let (width, height) = (buffer.width(), buffer.height());
    let too_large = || MosaicError::TooLarge { width, height };
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;
    let expected = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(too_large)?;
    let bytes = buffer.into_bytes();
    let actual = bytes.len();
    let img = RgbaImage::from_raw(w, h, bytes)
        .ok_or(MosaicError::BufferSizeMismatch { expected, actual })?;

    match ImageFormat::from_path(path)? {
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(img).to_rgb8().save(path)?,
        _ => img.save(path)?,
    }
    log::info!("wrote {} ({}x{})", path.display(), w, h);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_to_width_keeps_aspect_ratio() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(400, 300));
        let fitted = fit_to_width(&img, 100);
        assert_eq!(fitted.dimensions(), (100, 75));
    }

    #[test]
    fn fit_to_width_never_collapses_height() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(1000, 1));
        let fitted = fit_to_width(&img, 10);
        assert_eq!(fitted.dimensions(), (10, 1));
    }

    #[test]
    fn saved_png_reloads_identically() {
        let path = std::env::temp_dir()
            .join(format!("bayer_mosaic_save_{}.png", std::process::id()));
        let mut buffer = PixelBuffer::filled(3, 2, [0, 0, 0, 255]).unwrap();
        buffer.write_pixel(2, 1, [0, 62, 0, 255]).unwrap();
        let expected = buffer.clone();

        save_buffer(buffer, &path).unwrap();
        let reloaded = to_pixel_buffer(&load_image(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(reloaded, expected);
    }

    #[test]
    fn rgb_source_becomes_opaque_rgba() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(2, 1, image::Rgb([1, 2, 3])));
        let buf = to_pixel_buffer(&img).unwrap();
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.read_pixel(1, 0).unwrap(), [1, 2, 3, 255]);
    }
}
