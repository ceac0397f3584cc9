//! Conversions between scene space, pixel space and percentage layout.

use super::types::{
    CropInsets, GeometryError, NormalizedRect, PercentRect, PixelRect, PixelScale, SCENE_HEIGHT,
    SCENE_WIDTH,
};

/// Compute the per-axis scale from scene units to pixels of a bitmap with
/// the given natural size.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDimensions`] if either dimension is not a
/// positive finite number.
pub fn pixel_scale(natural_width: f64, natural_height: f64) -> Result<PixelScale, GeometryError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(natural_width) || !valid(natural_height) {
        return Err(GeometryError::InvalidDimensions {
            width: natural_width,
            height: natural_height,
        });
    }

    Ok(PixelScale {
        x: natural_width / SCENE_WIDTH,
        y: natural_height / SCENE_HEIGHT,
    })
}

/// Map a scene-space rectangle onto a bitmap's pixel grid.
///
/// Each coordinate is scaled by its axis factor and floored on its own, so
/// `width` is `floor(w * sx)` rather than `floor(x * sx + w * sx) - floor(x * sx)`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDimensions`] if the natural size is not positive.
///
/// # Example
///
/// ```ignore
/// // A 2000x1125 screenshot is exactly 2x the scene space
/// let px = to_pixel_space(&NormalizedRect::new(100.0, 100.0, 200.0, 100.0), 2000.0, 1125.0)?;
/// assert_eq!(px, PixelRect::new(200, 200, 400, 200));
/// ```
pub fn to_pixel_space(
    rect: &NormalizedRect,
    natural_width: f64,
    natural_height: f64,
) -> Result<PixelRect, GeometryError> {
    let scale = pixel_scale(natural_width, natural_height)?;
    Ok(PixelRect {
        x: (rect.x * scale.x).floor() as i64,
        y: (rect.y * scale.y).floor() as i64,
        width: (rect.width * scale.x).floor() as i64,
        height: (rect.height * scale.y).floor() as i64,
    })
}

/// The rectangle an element visually occupies once its crop insets apply.
///
/// No clamping: heavy insets yield zero or negative extents, and callers
/// decide how to render those (skip, or clamp before layout).
pub fn visual_rect(base: &NormalizedRect, insets: &CropInsets) -> NormalizedRect {
    let left = f64::from(insets.left);
    let right = f64::from(insets.right);
    let top = f64::from(insets.top);
    let bottom = f64::from(insets.bottom);

    NormalizedRect {
        x: base.x + left,
        y: base.y + top,
        width: base.width - left - right,
        height: base.height - top - bottom,
    }
}

/// Express a scene rectangle as percentages of the scene for relative layout.
pub fn to_percentage(rect: &NormalizedRect) -> PercentRect {
    PercentRect {
        left_pct: rect.x / SCENE_WIDTH * 100.0,
        top_pct: rect.y / SCENE_HEIGHT * 100.0,
        width_pct: rect.width / SCENE_WIDTH * 100.0,
        height_pct: rect.height / SCENE_HEIGHT * 100.0,
    }
}

/// Whether `inner` lies within `outer` grown by `pad` on every side.
pub fn rect_contains(outer: &NormalizedRect, inner: &NormalizedRect, pad: f64) -> bool {
    inner.x >= outer.x - pad
        && inner.y >= outer.y - pad
        && inner.right() <= outer.right() + pad
        && inner.bottom() <= outer.bottom() + pad
}


// ============================================================================
// Property-Based Tests
// ============================================================================
