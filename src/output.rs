//! PNG swatch output for color variants

use image::imageops::FilterType;
use image::{ImageEncoder, RgbaImage};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::color::Color;

/// Upper bound on pixels in a rendered or scaled swatch image
pub const MAX_SWATCH_PIXELS: u64 = 1 << 28;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Nothing to draw
    #[error("no colors to render")]
    Empty,
    /// Requested dimensions overflow
    #[error("swatch image too large: {0}")]
    TooLarge(String),
}

/// Render rows of colors as a grid of square swatches.
///
/// Each row is one base color's variants. Rows shorter than the widest row
/// leave transparent cells.
pub fn render_swatch_grid(rows: &[Vec<Color>], cell: u32) -> Result<RgbaImage, OutputError> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
    if columns == 0 || cell == 0 {
        return Err(OutputError::Empty);
    }

    let too_large = || OutputError::TooLarge(format!("{} x {} cells of {}px", columns, rows.len(), cell));
    let width = columns.checked_mul(cell).ok_or_else(too_large)?;
    let height = u32::try_from(rows.len())
        .ok()
        .and_then(|n| n.checked_mul(cell))
        .ok_or_else(too_large)?;
    if width as u64 * height as u64 > MAX_SWATCH_PIXELS {
        return Err(too_large());
    }

    let mut image = RgbaImage::new(width, height);
    for (row, colors) in rows.iter().enumerate() {
        for (column, color) in colors.iter().enumerate() {
            let pixel = color.to_rgba();
            let x0 = column as u32 * cell;
            let y0 = row as u32 * cell;
            for y in y0..y0 + cell {
                for x in x0..x0 + cell {
                    image.put_pixel(x, y, pixel);
                }
            }
        }
    }

    Ok(image)
}

/// Render a single strip of swatches.
pub fn render_swatches(colors: &[Color], cell: u32) -> Result<RgbaImage, OutputError> {
    render_swatch_grid(&[colors.to_vec()], cell)
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, OutputError> {
    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
    encoder.write_image(image.as_raw(), image.width(), image.height(), image::ColorType::Rgba8)?;
    Ok(png_data)
}

/// Scale image by integer factor using nearest-neighbor interpolation.
pub fn scale_image(image: RgbaImage, factor: u8) -> Result<RgbaImage, OutputError> {
    if factor <= 1 {
        return Ok(image);
    }
    let (w, h) = image.dimensions();
    let too_large = || OutputError::TooLarge(format!("{}x{} scaled by {}", w, h, factor));
    let (Some(new_w), Some(new_h)) = (w.checked_mul(factor as u32), h.checked_mul(factor as u32)) else {
        return Err(too_large());
    };
    if new_w as u64 * new_h as u64 > MAX_SWATCH_PIXELS {
        return Err(too_large());
    }
    Ok(image::imageops::resize(&image, new_w, new_h, FilterType::Nearest))
}
