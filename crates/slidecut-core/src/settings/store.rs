//! Keyed store of per-element settings.

use std::collections::HashMap;

use super::gate::{regeneration_reason, RegenerationReason};
use super::types::{ElementSettings, SettingsPatch};
use crate::scene::SlideData;

/// Result of one settings update.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsUpdate {
    pub previous: ElementSettings,
    pub current: ElementSettings,
    /// Set when the element's composite must be rebuilt.
    pub regenerate: Option<RegenerationReason>,
}

/// All element settings of one slide.
///
/// Every mutation goes through [`SettingsStore::update`], which runs the
/// regeneration gate against the previous snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsStore {
    entries: HashMap<String, ElementSettings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// One `svg`-mode entry per element of `slide`.
    pub fn for_slide(slide: &SlideData) -> Self {
        let entries = slide
            .elements
            .iter()
            .map(|e| (e.id.clone(), ElementSettings::default()))
            .collect();
        Self { entries }
    }

    /// Drop every edit and start over from `slide`.
    pub fn reset(&mut self, slide: &SlideData) {
        *self = Self::for_slide(slide);
    }

    pub fn get(&self, id: &str) -> Option<&ElementSettings> {
        self.entries.get(id)
    }

    /// Settings for `id`, or the defaults when it has none.
    pub fn settings(&self, id: &str) -> ElementSettings {
        self.entries.get(id).cloned().unwrap_or_default()
    }

    /// Apply `patch` to `id` and report whether it needs recomposition.
    ///
    /// Unknown ids get a fresh entry.
    pub fn update(&mut self, id: &str, patch: &SettingsPatch, has_cached: bool) -> SettingsUpdate {
        let previous = self.settings(id);
        let current = patch.apply(&previous);
        let regenerate = regeneration_reason(&previous, &current, has_cached);
        if let Some(reason) = regenerate {
            tracing::debug!(element = id, ?reason, "settings change needs recomposition");
        }

        self.entries.insert(id.to_string(), current.clone());
        SettingsUpdate {
            previous,
            current,
            regenerate,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElementSettings)> {
        self.entries.iter().map(|(id, s)| (id.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RenderMode;

    fn slide() -> SlideData {
        SlideData::from_json(
            r##"{"slide_meta": {"background_color": "#000"}, "elements": [
                {"id": "a", "type": "raster_image", "position": {"x": 0, "y": 0, "width": 10, "height": 10}},
                {"id": "b", "type": "text", "content": "hi", "position": {"x": 0, "y": 0, "width": 10, "height": 10}}
            ]}"##,
        )
        .unwrap()
    }

    fn to_image() -> SettingsPatch {
        SettingsPatch {
            render_mode: Some(RenderMode::Image),
            ..SettingsPatch::default()
        }
    }

    #[test]
    fn test_for_slide_starts_in_svg() {
        let store = SettingsStore::for_slide(&slide());
        assert_eq!(store.len(), 2);
        assert!(store.iter().all(|(_, s)| s.render_mode == RenderMode::Svg));
    }

    #[test]
    fn test_update_runs_gate() {
        let mut store = SettingsStore::for_slide(&slide());
        let update = store.update("a", &to_image(), false);

        assert_eq!(update.previous.render_mode, RenderMode::Svg);
        assert!(update.current.is_image());
        assert_eq!(update.regenerate, Some(RegenerationReason::NoCachedResult));
        assert!(store.get("a").unwrap().is_image());
    }

    #[test]
    fn test_update_is_incremental() {
        let mut store = SettingsStore::for_slide(&slide());
        store.update("a", &to_image(), false);

        let resize = SettingsPatch {
            width: Some(50.0),
            ..SettingsPatch::default()
        };
        let update = store.update("a", &resize, true);

        assert!(update.current.is_image());
        assert_eq!(update.current.width, Some(50.0));
        assert_eq!(update.regenerate, None);
    }

    #[test]
    fn test_update_unknown_id_creates_entry() {
        let mut store = SettingsStore::new();
        assert!(store.is_empty());
        store.update("z", &to_image(), false);
        assert!(store.get("z").is_some());
    }

    #[test]
    fn test_reset_discards_edits() {
        let slide = slide();
        let mut store = SettingsStore::for_slide(&slide);
        store.update("a", &to_image(), false);
        store.reset(&slide);
        assert_eq!(store.settings("a"), ElementSettings::default());
    }
}
