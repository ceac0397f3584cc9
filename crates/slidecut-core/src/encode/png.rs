//! PNG encoding for composited element rasters.
//!
//! PNG keeps the alpha channel that erase and feather produce, and the
//! encoder is deterministic, so identical pixels always yield identical bytes.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

/// Scheme prefix of a PNG data URL.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode straight RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns an error if the dimensions are zero, the buffer length is wrong,
/// or the encoder fails.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Base64-encode PNG bytes without a scheme prefix.
pub fn to_base64(png: &[u8]) -> String {
    BASE64.encode(png)
}

/// Build a directly renderable data URL from a bare base64 PNG payload.
pub fn to_data_url(base64: &str) -> String {
    format!("{PNG_DATA_URL_PREFIX}{base64}")
}
