//! Encoded output of one composite call.

use serde::{Deserialize, Serialize};

use crate::encode::{to_base64, to_data_url};

/// One element's current raster: PNG bytes plus the two string forms the
/// editor and the deck serializer consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositedImage {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Base64 PNG payload without a scheme prefix, for embedding in exports.
    pub base64: String,
    /// Directly renderable `data:image/png;base64,...` URL.
    pub url: String,
    #[serde(skip)]
    png: Vec<u8>,
}

impl CompositedImage {
    /// Wrap already-encoded PNG bytes.
    pub fn from_png(png: Vec<u8>, width: u32, height: u32) -> Self {
        let base64 = to_base64(&png);
        let url = to_data_url(&base64);
        Self {
            width,
            height,
            base64,
            url,
            png,
        }
    }

    /// Raw PNG bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Consume the result and return the raw PNG bytes.
    pub fn into_png(self) -> Vec<u8> {
        self.png
    }
}
