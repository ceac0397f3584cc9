//! Core types for source bitmap decoding.

use image::RgbaImage;
use thiserror::Error;

/// Error types for source bitmap decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not in a recognized image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The base64 payload could not be decoded.
    #[error("Invalid base64 image payload: {0}")]
    InvalidBase64(String),
}

/// A decoded source screenshot with straight (non-premultiplied) RGBA pixels.
///
/// The source is shared read-only by every element's composite call; nothing
/// in the pipeline mutates it.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: RgbaImage,
}

impl SourceImage {
    /// Create a source image from raw RGBA pixel data.
    ///
    /// Returns `None` if the buffer length is not `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, pixels).map(Self::from_rgba_image)
    }

    /// Wrap an already-decoded `image::RgbaImage`.
    pub fn from_rgba_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Natural size as floating point, the form the coordinate transforms take.
    pub fn natural_size(&self) -> (f64, f64) {
        (f64::from(self.width()), f64::from(self.height()))
    }

    /// Borrow the underlying pixel buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_image_creation() {
        let img = SourceImage::new(100, 50, vec![0u8; 100 * 50 * 4]).unwrap();

        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.natural_size(), (100.0, 50.0));
        assert!(!img.is_empty());
    }

    #[test]
    fn test_source_image_rejects_short_buffer() {
        assert!(SourceImage::new(10, 10, vec![0u8; 10 * 10 * 3]).is_none());
    }

    #[test]
    fn test_source_image_empty() {
        let img = SourceImage::new(0, 0, vec![]).unwrap();
        assert!(img.is_empty());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::CorruptedFile("truncated".to_string());
        assert_eq!(err.to_string(), "Corrupted or incomplete image file: truncated");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
