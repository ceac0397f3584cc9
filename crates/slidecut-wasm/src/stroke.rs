//! Erase-stroke recorder WASM bindings.
//!
//! Feed pointer events relative to the displayed crop; `pointer_up` hands
//! back the finished path ready to append to an element's `erasePaths`.

use crate::types::to_js;
use slidecut_core::StrokeRecorder;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct JsStrokeRecorder {
    inner: StrokeRecorder,
}

impl Default for JsStrokeRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsStrokeRecorder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsStrokeRecorder {
        JsStrokeRecorder {
            inner: StrokeRecorder::new(),
        }
    }

    /// Whether a stroke is in progress
    #[wasm_bindgen(getter)]
    pub fn drawing(&self) -> bool {
        self.inner.is_drawing()
    }

    /// Number of points recorded for the stroke in progress
    #[wasm_bindgen(getter)]
    pub fn point_count(&self) -> usize {
        self.inner.current_points().len()
    }

    /// Start a stroke. `width`/`height` are the displayed crop size.
    pub fn pointer_down(&mut self, x: f64, y: f64, width: f64, height: f64) -> bool {
        self.inner.pointer_down(x, y, width, height)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, width: f64, height: f64) -> bool {
        self.inner.pointer_move(x, y, width, height)
    }

    /// Finish the stroke. Resolves to the `[{x, y}, ...]` path in percent, or
    /// `null` when the stroke was too short to erase anything.
    pub fn pointer_up(&mut self) -> Result<JsValue, JsValue> {
        match self.inner.pointer_up() {
            Some(path) => to_js(&path),
            None => Ok(JsValue::NULL),
        }
    }

    /// Points of the stroke in progress, for drawing a live preview.
    pub fn current_points(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.current_points())
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use slidecut_core::composite::ErasePath;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_pointer_up_returns_path() {
        let mut rec = JsStrokeRecorder::new();
        rec.pointer_down(0.0, 0.0, 200.0, 100.0);
        rec.pointer_move(100.0, 50.0, 200.0, 100.0);

        let path: ErasePath = serde_wasm_bindgen::from_value(rec.pointer_up().unwrap()).unwrap();
        assert_eq!(path.points().len(), 2);
        assert_eq!(path.points()[1].x, 50.0);
    }

    #[wasm_bindgen_test]
    fn test_short_stroke_is_null() {
        let mut rec = JsStrokeRecorder::new();
        rec.pointer_down(0.0, 0.0, 200.0, 100.0);
        assert!(rec.pointer_up().unwrap().is_null());
    }
}
