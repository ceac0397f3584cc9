//! Coordinate transform WASM bindings.
//!
//! The overlay, the selection box and the preview all position themselves
//! with these, so they agree with the compositor to the pixel.

use crate::types::{from_js, from_js_or_default, to_js};
use slidecut_core::geometry;
use slidecut_core::{CropInsets, NormalizedRect};
use wasm_bindgen::prelude::*;

/// Map a scene rectangle to floored source-pixel coordinates.
///
/// Returns `{x, y, width, height}` in pixels.
#[wasm_bindgen]
pub fn to_pixel_space(
    rect: JsValue,
    natural_width: f64,
    natural_height: f64,
) -> Result<JsValue, JsValue> {
    let rect: NormalizedRect = from_js(rect, "rectangle")?;
    let pixels = geometry::to_pixel_space(&rect, natural_width, natural_height)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&pixels)
}

/// The rectangle an element visually occupies once `insets` apply.
///
/// `insets` may be omitted or partial; missing sides are zero.
#[wasm_bindgen]
pub fn visual_rect(base: JsValue, insets: JsValue) -> Result<JsValue, JsValue> {
    let base: NormalizedRect = from_js(base, "rectangle")?;
    let insets: CropInsets = from_js_or_default(insets, "crop insets")?;
    to_js(&geometry::visual_rect(&base, &insets))
}

/// Express a scene rectangle as `{leftPct, topPct, widthPct, heightPct}`.
#[wasm_bindgen]
pub fn to_percentage(rect: JsValue) -> Result<JsValue, JsValue> {
    let rect: NormalizedRect = from_js(rect, "rectangle")?;
    to_js(&geometry::to_percentage(&rect))
}

/// Scene width in normalized units
#[wasm_bindgen]
pub fn scene_width() -> f64 {
    slidecut_core::SCENE_WIDTH
}

/// Scene height in normalized units
#[wasm_bindgen]
pub fn scene_height() -> f64 {
    slidecut_core::SCENE_HEIGHT
}
