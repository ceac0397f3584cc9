//! Slidecut WASM - WebAssembly bindings for Slidecut
//!
//! This crate exposes the slidecut-core compositing engine to the
//! browser-based slide editor.
//!
//! # Module Structure
//!
//! - `composite` - Region compositing (Promise-returning) and source decoding
//! - `geometry` - Scene/pixel transforms and the visual rectangle
//! - `session` - Editor session: settings, debounced recomposition, export layout
//! - `stroke` - Erase-stroke pointer recorder
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { composite } from '@slidecut/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = await composite(bytes, img.naturalWidth, img.naturalHeight, element.position, {});
//! preview.src = out.url;
//! ```

use wasm_bindgen::prelude::*;

mod composite;
mod geometry;
mod session;
mod stroke;
mod types;

// Re-export public types
pub use composite::{composite, composite_source, decode_source, decode_source_base64};
pub use geometry::{scene_height, scene_width, to_percentage, to_pixel_space, visual_rect};
pub use session::JsEditorSession;
pub use stroke::JsStrokeRecorder;
pub use types::{JsCompositedImage, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
