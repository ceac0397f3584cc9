//! Source screenshot decoding.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::ImageReader;

use super::{DecodeError, SourceImage};

/// Decode a source screenshot from encoded bytes (JPEG or PNG).
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be detected.
/// Returns `DecodeError::CorruptedFile` if the data is truncated or corrupt.
pub fn decode_source(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(SourceImage::from_rgba_image(img.into_rgba8()))
}

/// Decode a source screenshot from a base64 payload.
///
/// Accepts either bare base64 or a full `data:<mime>;base64,` URL, which is
/// how uploads reach the editor.
///
/// # Errors
///
/// Returns `DecodeError::InvalidBase64` if the payload is not valid base64,
/// otherwise the same errors as [`decode_source`].
pub fn decode_source_base64(payload: &str) -> Result<SourceImage, DecodeError> {
    let data = strip_data_url(payload.trim());
    let bytes = BASE64
        .decode(data)
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;
    decode_source(&bytes)
}

fn strip_data_url(payload: &str) -> &str {
    if !payload.starts_with("data:") {
        return payload;
    }
    match payload.find(";base64,") {
        Some(idx) => &payload[idx + ";base64,".len()..],
        None => payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let pixels: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(&pixels, width, height, ExtendedColorType::Rgba8)
            .unwrap();
        out
    }

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(8, 4, [10, 20, 30, 255]);
        let img = decode_source(&bytes).unwrap();

        assert_eq!(img.width(), 8);
        assert_eq!(img.height(), 4);
        assert_eq!(img.as_rgba().get_pixel(3, 2).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_invalid_format() {
        let result = decode_source(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(16, 16, [255, 0, 0, 255]);
        let truncated = &bytes[..bytes.len() / 2];
        let result = decode_source(truncated);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_source(&[]).is_err());
    }

    #[test]
    fn test_decode_base64_bare_and_data_url() {
        let bytes = png_bytes(2, 2, [1, 2, 3, 255]);
        let encoded = BASE64.encode(&bytes);

        let bare = decode_source_base64(&encoded).unwrap();
        assert_eq!((bare.width(), bare.height()), (2, 2));

        let url = format!("data:image/png;base64,{}", encoded);
        let from_url = decode_source_base64(&url).unwrap();
        assert_eq!(from_url.as_rgba().as_raw(), bare.as_rgba().as_raw());
    }

    #[test]
    fn test_decode_base64_invalid() {
        let result = decode_source_base64("not base64 at all!!");
        assert!(matches!(result, Err(DecodeError::InvalidBase64(_))));
    }

    #[test]
    fn test_strip_data_url() {
        assert_eq!(strip_data_url("abcd"), "abcd");
        assert_eq!(strip_data_url("data:image/jpeg;base64,abcd"), "abcd");
        assert_eq!(strip_data_url("data:text/plain,abcd"), "data:text/plain,abcd");
    }
}
