//! Hides text that an image-mode raster already shows.
//!
//! The decomposition frequently reports text that is baked into a raster
//! element as separate text elements. Once the raster renders as the actual
//! crop, those texts would be drawn twice.

use std::collections::HashSet;

use crate::geometry::rect_contains;
use crate::scene::SlideData;
use crate::settings::SettingsStore;

/// Tolerance, in scene units, for a text box to count as covered.
pub const OCCLUSION_PAD: f64 = 2.0;

/// Ids of text elements fully covered by an image-mode raster element.
///
/// Compares the positions reported by the decomposition, not user overrides.
pub fn occluded_text_ids(slide: &SlideData, store: &SettingsStore) -> HashSet<String> {
    let rasters: Vec<_> = slide
        .elements
        .iter()
        .filter(|e| e.is_raster() && store.get(&e.id).is_some_and(|s| s.is_image()))
        .collect();

    slide
        .elements
        .iter()
        .filter(|t| t.is_text())
        .filter(|t| {
            rasters
                .iter()
                .any(|r| rect_contains(&r.position, &t.position, OCCLUSION_PAD))
        })
        .map(|t| t.id.clone())
        .collect()
}
