//! Region compositing WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { composite } from '@slidecut/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = await composite(bytes, img.naturalWidth, img.naturalHeight,
//!   { x: 100, y: 100, width: 200, height: 100 },
//!   { feather: 2, inflatePx: 2, cropInsets: { top: 20 } });
//! preview.src = out.url;
//! ```

use crate::types::{from_js, from_js_or_default, JsCompositedImage, JsSourceImage};
use slidecut_core::{CompositeOptions, NormalizedRect};
use wasm_bindgen::prelude::*;

/// Composite one element's region out of an encoded screenshot.
///
/// # Arguments
///
/// * `bytes` - Encoded source screenshot (JPEG or PNG)
/// * `natural_width`, `natural_height` - Natural size of the screenshot
/// * `region` - `{x, y, width, height}` in scene units (1000 x 562.5)
/// * `options` - Composite options; missing fields take their defaults
///
/// # Errors
///
/// Rejects if the bytes cannot be decoded, the natural size is not positive,
/// or the region/options objects are malformed. Nothing is cached.
#[wasm_bindgen]
pub async fn composite(
    bytes: Vec<u8>,
    natural_width: f64,
    natural_height: f64,
    region: JsValue,
    options: JsValue,
) -> Result<JsCompositedImage, JsValue> {
    let region: NormalizedRect = from_js(region, "region")?;
    let options: CompositeOptions = from_js_or_default(options, "composite options")?;

    slidecut_core::composite_bytes(&bytes, natural_width, natural_height, &region, &options)
        .map(JsCompositedImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Composite one element's region out of an already decoded screenshot.
///
/// Same as [`composite`] without the decode step.
#[wasm_bindgen]
pub fn composite_source(
    source: &JsSourceImage,
    natural_width: f64,
    natural_height: f64,
    region: JsValue,
    options: JsValue,
) -> Result<JsCompositedImage, JsValue> {
    let region: NormalizedRect = from_js(region, "region")?;
    let options: CompositeOptions = from_js_or_default(options, "composite options")?;

    slidecut_core::composite(source.inner(), natural_width, natural_height, &region, &options)
        .map(JsCompositedImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an encoded screenshot (JPEG or PNG) once for reuse.
#[wasm_bindgen]
pub fn decode_source(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    slidecut_core::decode_source(bytes)
        .map(JsSourceImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a base64 screenshot, with or without a `data:` URL prefix.
#[wasm_bindgen]
pub fn decode_source_base64(payload: &str) -> Result<JsSourceImage, JsValue> {
    slidecut_core::decode_source_base64(payload)
        .map(JsSourceImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
