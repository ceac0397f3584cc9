//! Geometry types shared by the compositor, the settings store and export.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the normalized scene space.
pub const SCENE_WIDTH: f64 = 1000.0;

/// Height of the normalized scene space (16:9 of [`SCENE_WIDTH`]).
pub const SCENE_HEIGHT: f64 = 562.5;

/// Errors raised by coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The natural size of the target bitmap is not positive.
    ///
    /// This almost always means the caller passed an image that has not
    /// finished loading.
    #[error("Invalid dimensions: natural width ({width}) and height ({height}) must be positive")]
    InvalidDimensions { width: f64, height: f64 },

    /// The crop window is larger than any surface we are willing to allocate.
    #[error("Crop window {width}x{height} exceeds the maximum surface size")]
    SurfaceTooLarge { width: i64, height: i64 },
}

/// A rectangle in normalized scene space (1000 x 562.5).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle covers no area (zero or negative extent).
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Crop insets in normalized scene units.
///
/// Positive values shrink the visible rectangle inward, negative values
/// expand it outward and re-include source content around the element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CropInsets {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl CropInsets {
    pub fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// True when all four insets are zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-axis factors from scene units to source pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    pub x: f64,
    pub y: f64,
}

/// A rectangle in source bitmap pixels.
///
/// Signed because inflate and negative insets can push the origin past the
/// bitmap edge before clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A rectangle expressed as percentages of the scene, for relative layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentRect {
    pub left_pct: f64,
    pub top_pct: f64,
    pub width_pct: f64,
    pub height_pct: f64,
}
