//! Editor session WASM bindings.
//!
//! The host drives recomposition with a timer:
//!
//! ```typescript
//! const session = new JsEditorSession(slideJson, sourceBytes);
//! session.update_settings('chart', { renderMode: 'image' });
//!
//! const tick = () => {
//!   session.poll();
//!   const delay = session.next_delay_ms();
//!   if (delay !== undefined) setTimeout(tick, delay);
//! };
//! tick();
//! ```

use crate::types::{from_js, to_js, JsCompositedImage};
use slidecut_core::settings::ElementSettings;
use slidecut_core::{
    decode_source, EditorSession, SchedulerConfig, SettingsPatch, SlideData, SourceImage,
};
use wasm_bindgen::prelude::*;
use web_sys::console;

fn parse_slide(slide_json: &str) -> Result<SlideData, JsValue> {
    SlideData::from_json(slide_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid slide data: {}", e)))
}

/// Decode the source screenshot. A corrupt one leaves the session without a
/// source, so every raster falls back to its placeholder.
fn parse_source(source: Option<Vec<u8>>) -> (Option<SourceImage>, Option<String>) {
    match source.map(|bytes| decode_source(&bytes)) {
        None => (None, None),
        Some(Ok(image)) => (Some(image), None),
        Some(Err(err)) => {
            let message = err.to_string();
            console::warn_1(&JsValue::from_str(&format!("Source image unusable: {}", message)));
            (None, Some(message))
        }
    }
}

#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession,
    source_error: Option<String>,
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Create a session for one decomposed slide.
    ///
    /// # Arguments
    /// * `slide_json` - Scene graph from the decomposition service
    /// * `source` - Encoded source screenshot; without it, or when it cannot
    ///   be decoded, every raster renders as a placeholder
    /// * `debounce_ms` - Quiescence before recomposition (default 500)
    #[wasm_bindgen(constructor)]
    pub fn new(
        slide_json: &str,
        source: Option<Vec<u8>>,
        debounce_ms: Option<f64>,
    ) -> Result<JsEditorSession, JsValue> {
        let slide = parse_slide(slide_json)?;
        let (source, source_error) = parse_source(source);
        let mut config = SchedulerConfig::default();
        if let Some(ms) = debounce_ms {
            config.debounce_ms = ms;
        }

        Ok(JsEditorSession {
            inner: EditorSession::new(slide, source, config),
            source_error,
        })
    }

    /// Replace the slide and source, discarding every edit.
    pub fn reload(&mut self, slide_json: &str, source: Option<Vec<u8>>) -> Result<(), JsValue> {
        let slide = parse_slide(slide_json)?;
        let (source, source_error) = parse_source(source);
        self.inner.reload(slide, source);
        self.source_error = source_error;
        Ok(())
    }

    /// Why the source screenshot could not be decoded, if it could not.
    #[wasm_bindgen(getter)]
    pub fn source_error(&self) -> Option<String> {
        self.source_error.clone()
    }

    /// Merge `patch` into an element's settings.
    ///
    /// Returns true when a recomposition was scheduled.
    pub fn update_settings(&mut self, id: &str, patch: JsValue) -> Result<bool, JsValue> {
        let patch: SettingsPatch = from_js(patch, "settings patch")?;
        let update = self.inner.update_settings(id, &patch, js_sys::Date::now());
        Ok(update.regenerate.is_some() && self.inner.source().is_some())
    }

    /// Current settings of an element.
    pub fn settings(&self, id: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.settings(id))
    }

    /// Milliseconds until [`poll`](Self::poll) has work, or `undefined`.
    pub fn next_delay_ms(&self) -> Option<f64> {
        self.inner
            .next_deadline()
            .map(|deadline| (deadline - js_sys::Date::now()).max(0.0))
    }

    /// Run every recomposition whose debounce has elapsed.
    ///
    /// Returns how many elements changed. Failures are logged to the console
    /// and kept for [`error`](Self::error).
    pub fn poll(&mut self) -> usize {
        let jobs = self.inner.take_jobs(js_sys::Date::now());
        let mut accepted = 0;
        for job in &jobs {
            let outcome = self.inner.run_job(job);
            if let Err(err) = &outcome {
                console::warn_1(&JsValue::from_str(&format!(
                    "Composite failed for {}: {}",
                    job.element_id, err
                )));
            }
            if self.inner.finish(job, outcome) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Composite with uncommitted settings for a live editor preview.
    pub fn preview(
        &self,
        id: &str,
        settings: JsValue,
    ) -> Result<Option<JsCompositedImage>, JsValue> {
        let settings: ElementSettings = from_js(settings, "element settings")?;
        self.inner
            .preview(id, &settings)
            .map(|image| image.map(JsCompositedImage::from))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Cached composite of an element, if any.
    pub fn image(&self, id: &str) -> Option<JsCompositedImage> {
        self.inner.image(id).cloned().map(JsCompositedImage::from)
    }

    /// Message of the last failed composite of an element, if any.
    pub fn error(&self, id: &str) -> Option<String> {
        self.inner.error(id).map(str::to_string)
    }

    /// `{x, y, width, height}` where the element is drawn, or `null`.
    pub fn visual_rect(&self, id: &str) -> Result<JsValue, JsValue> {
        match self.inner.visual_rect(id) {
            Some(rect) => to_js(&rect),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn is_text_hidden(&self, id: &str) -> bool {
        self.inner.is_text_hidden(id)
    }

    pub fn toggle_text_hidden(&mut self, id: &str) -> bool {
        self.inner.toggle_text_hidden(id)
    }

    #[wasm_bindgen(getter)]
    pub fn show_text(&self) -> bool {
        self.inner.show_text()
    }

    #[wasm_bindgen(setter)]
    pub fn set_show_text(&mut self, show: bool) {
        self.inner.set_show_text(show);
    }

    /// Placement of every visible element for the deck serializer.
    pub fn export_layout(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.export_layout())
    }
}
