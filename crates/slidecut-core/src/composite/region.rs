//! Crop window computation and source extraction (pipeline steps 1-5).
//!
//! The window is derived in a fixed order: scene rect to pixels, inflate,
//! insets, clamp. Insets are authored in scene units, so they go through the
//! same per-axis scale as the region itself.

use image::RgbaImage;

use crate::geometry::{
    pixel_scale, to_pixel_space, CropInsets, GeometryError, NormalizedRect, PixelRect,
};

/// Compute the source pixel rectangle a composite call copies from.
///
/// The result always has `x, y >= 0` and `width, height >= 1`. Degenerate
/// requests (insets larger than the element, regions past the bitmap edge)
/// clamp to a 1-pixel minimum instead of failing, since sliders routinely
/// pass through such states while dragging.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDimensions`] if the natural size is not positive.
pub fn crop_window(
    region: &NormalizedRect,
    natural_width: f64,
    natural_height: f64,
    inflate: i64,
    insets: &CropInsets,
) -> Result<PixelRect, GeometryError> {
    let scale = pixel_scale(natural_width, natural_height)?;
    let base = to_pixel_space(region, natural_width, natural_height)?;

    let inflate = inflate.max(0);
    let mut x = base.x - inflate;
    let mut y = base.y - inflate;
    let mut width = base.width + inflate * 2;
    let mut height = base.height + inflate * 2;

    let left = f64::from(insets.left);
    let right = f64::from(insets.right);
    let top = f64::from(insets.top);
    let bottom = f64::from(insets.bottom);

    x += (left * scale.x).floor() as i64;
    y += (top * scale.y).floor() as i64;
    width -= ((left + right) * scale.x).floor() as i64;
    height -= ((top + bottom) * scale.y).floor() as i64;

    let max_width = natural_width.floor() as i64;
    let max_height = natural_height.floor() as i64;

    x = x.max(0);
    y = y.max(0);
    let clamped_width = (max_width - x).min(width.max(1)).max(1);
    let clamped_height = (max_height - y).min(height.max(1)).max(1);

    if width < 1 || height < 1 || x >= max_width || y >= max_height {
        tracing::debug!(
            requested_width = width,
            requested_height = height,
            x,
            y,
            "degenerate crop window, clamped to minimum surface"
        );
    }

    Ok(PixelRect::new(x, y, clamped_width, clamped_height))
}

/// Longest side of a composited surface, in pixels.
pub const MAX_SURFACE_SIDE: i64 = 32_767;

/// Largest composited surface area, in pixels.
pub const MAX_SURFACE_PIXELS: i64 = 268_435_456;

fn surface_size(window: &PixelRect) -> Result<(u32, u32), GeometryError> {
    let width = window.width.max(1);
    let height = window.height.max(1);
    let too_large = GeometryError::SurfaceTooLarge { width, height };

    if width > MAX_SURFACE_SIDE
        || height > MAX_SURFACE_SIDE
        || width.saturating_mul(height) > MAX_SURFACE_PIXELS
    {
        return Err(too_large);
    }
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(too_large),
    }
}

/// Copy the window out of the source into a new surface of exactly the
/// window's size. Window pixels that fall outside the source stay fully
/// transparent.
///
/// # Errors
///
/// Returns [`GeometryError::SurfaceTooLarge`] if the window exceeds
/// [`MAX_SURFACE_SIDE`] or [`MAX_SURFACE_PIXELS`].
pub fn extract(source: &RgbaImage, window: &PixelRect) -> Result<RgbaImage, GeometryError> {
    let (out_width, out_height) = surface_size(window)?;
    let mut output = RgbaImage::new(out_width, out_height);

    let src_width = i64::from(source.width());
    let src_height = i64::from(source.height());

    // Visible span of each row, in source columns
    let col_start = window.x.max(0);
    let col_end = (window.x + i64::from(out_width)).min(src_width);
    if col_start >= col_end {
        return Ok(output);
    }
    let span = ((col_end - col_start) * 4) as usize;
    let dst_offset = ((col_start - window.x) * 4) as usize;

    let src = source.as_raw();
    let dst_stride = (out_width * 4) as usize;
    let src_stride = (src_width * 4) as usize;
    let dst = &mut *output;

    for row in 0..i64::from(out_height) {
        let src_y = window.y + row;
        if src_y < 0 || src_y >= src_height {
            continue;
        }

        let src_start = src_y as usize * src_stride + (col_start * 4) as usize;
        let dst_start = row as usize * dst_stride + dst_offset;
        dst[dst_start..dst_start + span].copy_from_slice(&src[src_start..src_start + span]);
    }

    Ok(output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
