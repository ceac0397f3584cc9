//! Decides when an element's composite must be rebuilt.

use serde::Serialize;

use super::types::ElementSettings;

/// Why a recomposition was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RegenerationReason {
    /// Nothing is cached for the element yet.
    NoCachedResult,
    /// The element switched into image mode.
    EnteredImageMode,
    /// An input that shapes the pixels changed.
    PixelInputsChanged,
}

/// Why `next` needs a fresh composite, or `None` when the cache still holds.
///
/// Nothing is regenerated unless `next` renders as an image.
pub fn regeneration_reason(
    prev: &ElementSettings,
    next: &ElementSettings,
    has_cached: bool,
) -> Option<RegenerationReason> {
    if !next.is_image() {
        return None;
    }
    if !has_cached {
        return Some(RegenerationReason::NoCachedResult);
    }
    if !prev.is_image() {
        return Some(RegenerationReason::EnteredImageMode);
    }
    if prev.pixel_inputs_differ(next) {
        return Some(RegenerationReason::PixelInputsChanged);
    }
    None
}

pub fn needs_regeneration(
    prev: &ElementSettings,
    next: &ElementSettings,
    has_cached: bool,
) -> bool {
    regeneration_reason(prev, next, has_cached).is_some()
}

/// Whether an external remixer may stand in for the compositor.
///
/// Pending pixel edits make the compositor authoritative.
pub fn remix_eligible(settings: &ElementSettings) -> bool {
    !settings.has_pixel_edits()
}
