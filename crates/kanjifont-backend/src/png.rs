//! Deterministic grayscale PNG encoding for preview sheets.
//!
//! Compression and filter settings are fixed so the same sheet always
//! encodes to the same bytes.

use std::io::Write;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

/// Errors from PNG encoding.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export settings.
#[derive(Debug, Clone)]
pub struct PngConfig {
    pub compression: Compression,
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Writes an 8-bit grayscale image to any writer.
pub fn write_grayscale_to_writer<W: Write>(
    pixels: &[u8],
    width: u32,
    height: u32,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if width == 0 || height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "{}x{} image has no pixels",
            width, height
        )));
    }
    let expected = (width as usize) * (height as usize);
    if pixels.len() != expected {
        return Err(PngError::InvalidDimensions(format!(
            "Expected {} bytes for {}x{} grayscale, got {}",
            expected,
            width,
            height,
            pixels.len()
        )));
    }

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(pixels)?;

    Ok(())
}

/// Encodes an 8-bit grayscale image into memory.
pub fn encode_grayscale(
    pixels: &[u8],
    width: u32,
    height: u32,
    config: &PngConfig,
) -> Result<Vec<u8>, PngError> {
    let mut out = Vec::new();
    write_grayscale_to_writer(pixels, width, height, &mut out, config)?;
    Ok(out)
}
