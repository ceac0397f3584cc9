//! Edit operations that parameterize one composite call.

use serde::{Deserialize, Serialize};

use crate::geometry::CropInsets;

/// Default outward inflate in output pixels.
pub const DEFAULT_INFLATE_PX: i32 = 2;

/// Default edge feather in output pixels.
pub const DEFAULT_FEATHER: f32 = 2.0;

/// Edge feather used when background removal is requested.
pub const REMOVE_BG_FEATHER: f32 = 5.0;

/// A point of an erase stroke, in percent (0-100) of the cropped output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ErasePoint {
    pub x: f64,
    pub y: f64,
}

impl ErasePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A freehand erase stroke: points in the order the pointer visited them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErasePath(pub Vec<ErasePoint>);

impl ErasePath {
    pub fn new(points: Vec<ErasePoint>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[ErasePoint] {
        &self.0
    }

    /// A stroke needs at least two points to erase anything.
    pub fn is_drawable(&self) -> bool {
        self.0.len() >= 2
    }
}

impl From<Vec<ErasePoint>> for ErasePath {
    fn from(points: Vec<ErasePoint>) -> Self {
        Self(points)
    }
}

/// Legacy rectangular erase, in percent (0-100) of the cropped output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EraseRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl EraseRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Options for one composite call.
///
/// Missing fields take their defaults when deserialized, matching what the
/// editor sends for a freshly selected element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositeOptions {
    /// Edge fade width in output pixels (0 disables).
    pub feather: f32,
    /// Outward growth on every side, in output pixels. Negative values are
    /// treated as zero: only insets shrink a crop.
    pub inflate_px: i32,
    /// Crop insets in scene units.
    pub crop_insets: CropInsets,
    pub erase_regions: Vec<EraseRegion>,
    pub erase_paths: Vec<ErasePath>,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            feather: DEFAULT_FEATHER,
            inflate_px: DEFAULT_INFLATE_PX,
            crop_insets: CropInsets::default(),
            erase_regions: Vec::new(),
            erase_paths: Vec::new(),
        }
    }
}

impl CompositeOptions {
    /// Inflate actually applied: never negative.
    pub fn effective_inflate(&self) -> i64 {
        i64::from(self.inflate_px.max(0))
    }

    /// Feather actually applied: never negative, NaN treated as zero.
    pub fn effective_feather(&self) -> f32 {
        if self.feather.is_nan() {
            0.0
        } else {
            self.feather.max(0.0)
        }
    }
}
