//! Per-element edit state.

use serde::{Deserialize, Serialize};

use crate::composite::{
    CompositeOptions, ErasePath, EraseRegion, DEFAULT_FEATHER, DEFAULT_INFLATE_PX,
    REMOVE_BG_FEATHER,
};
use crate::geometry::{visual_rect, CropInsets, NormalizedRect};

/// How an element is drawn on the reconstructed slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Vector placeholder (the decomposition's own description).
    #[default]
    Svg,
    /// Raster crop composited from the source screenshot.
    Image,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Mutable edit state for one element.
///
/// Optional fields stay `None` until the user touches them, so the settings
/// the editor persists only carry what was actually edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementSettings {
    pub render_mode: RenderMode,
    /// Only widens the edge feather; there is no segmentation.
    #[serde(skip_serializing_if = "is_false")]
    pub remove_bg: bool,
    /// Outward inflate in output pixels (-10 to 10 in the editor).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inflate_amount: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_insets: Option<CropInsets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erase_paths: Option<Vec<ErasePath>>,
    /// Legacy rectangular erases, kept so older projects still load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erase_regions: Option<Vec<EraseRegion>>,
}

impl ElementSettings {
    pub fn new(render_mode: RenderMode) -> Self {
        Self {
            render_mode,
            ..Self::default()
        }
    }

    pub fn is_image(&self) -> bool {
        self.render_mode == RenderMode::Image
    }

    pub fn inflate_px(&self) -> i32 {
        self.inflate_amount.unwrap_or(DEFAULT_INFLATE_PX)
    }

    pub fn feather(&self) -> f32 {
        if self.remove_bg {
            REMOVE_BG_FEATHER
        } else {
            DEFAULT_FEATHER
        }
    }

    pub fn insets(&self) -> CropInsets {
        self.crop_insets.unwrap_or_default()
    }

    /// Whether any edit that changes the crop's pixels is pending.
    ///
    /// Empty erase lists and all-zero insets count as no edit.
    pub fn has_pixel_edits(&self) -> bool {
        self.inflate_amount.is_some_and(|v| v != 0)
            || self.remove_bg
            || self.crop_insets.is_some_and(|i| !i.is_zero())
            || self.erase_regions.as_ref().is_some_and(|r| !r.is_empty())
            || self.erase_paths.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Whether the inputs that shape the composited pixels differ.
    ///
    /// Position, size, font and colour overrides are deliberately not part
    /// of this comparison.
    pub fn pixel_inputs_differ(&self, other: &ElementSettings) -> bool {
        self.inflate_amount != other.inflate_amount
            || self.remove_bg != other.remove_bg
            || self.crop_insets != other.crop_insets
            || self.erase_regions != other.erase_regions
            || self.erase_paths != other.erase_paths
    }

    /// The element's base rectangle after position/size overrides.
    pub fn effective_rect(&self, position: &NormalizedRect) -> NormalizedRect {
        NormalizedRect {
            x: self.x.unwrap_or(position.x),
            y: self.y.unwrap_or(position.y),
            width: self.width.unwrap_or(position.width),
            height: self.height.unwrap_or(position.height),
        }
    }

    /// The rectangle the edited element visually occupies.
    ///
    /// The overlay, the selection box and the export layout all call this,
    /// so they cannot disagree.
    pub fn visual_rect(&self, position: &NormalizedRect) -> NormalizedRect {
        visual_rect(&self.effective_rect(position), &self.insets())
    }

    pub fn composite_options(&self) -> CompositeOptions {
        CompositeOptions::from_settings(self)
    }
}

impl CompositeOptions {
    /// Options for compositing an element with the given settings.
    pub fn from_settings(settings: &ElementSettings) -> Self {
        Self {
            feather: settings.feather(),
            inflate_px: settings.inflate_px(),
            crop_insets: settings.insets(),
            erase_regions: settings.erase_regions.clone().unwrap_or_default(),
            erase_paths: settings.erase_paths.clone().unwrap_or_default(),
        }
    }
}

/// A partial update to [`ElementSettings`]: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub render_mode: Option<RenderMode>,
    pub remove_bg: Option<bool>,
    pub inflate_amount: Option<i32>,
    pub font_size: Option<f64>,
    pub fill_color: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub hidden: Option<bool>,
    pub crop_insets: Option<CropInsets>,
    pub erase_paths: Option<Vec<ErasePath>>,
    pub erase_regions: Option<Vec<EraseRegion>>,
}

impl SettingsPatch {
    /// Return `base` with every field present in the patch overwritten.
    pub fn apply(&self, base: &ElementSettings) -> ElementSettings {
        let mut next = base.clone();
        if let Some(mode) = self.render_mode {
            next.render_mode = mode;
        }
        if let Some(remove_bg) = self.remove_bg {
            next.remove_bg = remove_bg;
        }
        if let Some(hidden) = self.hidden {
            next.hidden = hidden;
        }
        if self.inflate_amount.is_some() {
            next.inflate_amount = self.inflate_amount;
        }
        if self.font_size.is_some() {
            next.font_size = self.font_size;
        }
        if self.fill_color.is_some() {
            next.fill_color.clone_from(&self.fill_color);
        }
        if self.x.is_some() {
            next.x = self.x;
        }
        if self.y.is_some() {
            next.y = self.y;
        }
        if self.width.is_some() {
            next.width = self.width;
        }
        if self.height.is_some() {
            next.height = self.height;
        }
        if self.crop_insets.is_some() {
            next.crop_insets = self.crop_insets;
        }
        if self.erase_paths.is_some() {
            next.erase_paths.clone_from(&self.erase_paths);
        }
        if self.erase_regions.is_some() {
            next.erase_regions.clone_from(&self.erase_regions);
        }
        next
    }

    /// True when applying the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
