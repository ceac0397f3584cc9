//! WASM-compatible wrapper types.
//!
//! These wrap the core Slidecut types and handle conversion between Rust
//! values and the plain JavaScript objects the editor passes around.

use serde::de::DeserializeOwned;
use serde::Serialize;
use slidecut_core::{CompositedImage, SourceImage};
use wasm_bindgen::prelude::*;

/// A composited element raster for JavaScript.
#[wasm_bindgen]
pub struct JsCompositedImage {
    inner: CompositedImage,
}

#[wasm_bindgen]
impl JsCompositedImage {
    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Base64 PNG payload without a scheme prefix
    #[wasm_bindgen(getter)]
    pub fn base64(&self) -> String {
        self.inner.base64.clone()
    }

    /// `data:image/png;base64,...` URL, usable as an `<img>` source
    #[wasm_bindgen(getter)]
    pub fn url(&self) -> String {
        self.inner.url.clone()
    }

    /// Returns the PNG bytes as a Uint8Array (copied out of WASM memory).
    pub fn png(&self) -> Vec<u8> {
        self.inner.png_bytes().to_vec()
    }
}

impl From<CompositedImage> for JsCompositedImage {
    fn from(inner: CompositedImage) -> Self {
        Self { inner }
    }
}

/// A decoded source screenshot held in WASM memory.
///
/// Decode once per document and reuse it for every element, instead of
/// passing the encoded bytes to each composite call.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: SourceImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }
}

impl JsSourceImage {
    pub(crate) fn inner(&self) -> &SourceImage {
        &self.inner
    }
}

impl From<SourceImage> for JsSourceImage {
    fn from(inner: SourceImage) -> Self {
        Self { inner }
    }
}

/// Deserialize a JavaScript object, naming `what` in the error.
pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

/// Like [`from_js`], but `undefined` and `null` give the default.
pub(crate) fn from_js_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    what: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        from_js(value, what)
    }
}

pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
