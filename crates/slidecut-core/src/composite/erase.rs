//! Erase passes (pipeline steps 6-7).
//!
//! Both passes work in percent-of-output coordinates, so they only ever touch
//! the already-cropped surface: nothing outside the crop can be restored.

use image::RgbaImage;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::options::{ErasePath, EraseRegion};

/// Minimum eraser stroke width in output pixels.
pub const MIN_STROKE_WIDTH: f32 = 5.0;

/// Eraser stroke width as a fraction of the output width.
pub const STROKE_WIDTH_RATIO: f32 = 0.05;

/// Stroke width for an output of the given width.
pub fn stroke_width(output_width: u32) -> f32 {
    MIN_STROKE_WIDTH.max(output_width as f32 * STROKE_WIDTH_RATIO)
}

/// Clear each rectangle to full transparency.
///
/// A pixel is cleared when its center lies inside the rectangle. Negative
/// extents are normalized first.
pub fn clear_regions(image: &mut RgbaImage, regions: &[EraseRegion]) {
    if regions.is_empty() {
        return;
    }

    let w = f64::from(image.width());
    let h = f64::from(image.height());

    for region in regions {
        let x0 = region.x / 100.0 * w;
        let y0 = region.y / 100.0 * h;
        let x1 = x0 + region.width / 100.0 * w;
        let y1 = y0 + region.height / 100.0 * h;

        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));

        // First and last pixel whose center falls inside [left, right)
        let col_start = (left - 0.5).ceil().max(0.0) as u32;
        let col_end = ((right - 0.5).ceil().min(w)).max(0.0) as u32;
        let row_start = (top - 0.5).ceil().max(0.0) as u32;
        let row_end = ((bottom - 0.5).ceil().min(h)).max(0.0) as u32;

        for y in row_start..row_end {
            for x in col_start..col_end {
                image.put_pixel(x, y, image::Rgba([0, 0, 0, 0]));
            }
        }
    }
}

/// Stroke-erase each freehand path with round caps and joins.
///
/// The strokes are rasterized into a coverage mask, then removed from the
/// image the way a destination-out draw would: each pixel keeps
/// `alpha * (1 - coverage)`. Paths with fewer than two points are skipped.
pub fn erase_paths(image: &mut RgbaImage, paths: &[ErasePath]) {
    let drawable: Vec<&ErasePath> = paths.iter().filter(|p| p.is_drawable()).collect();
    if drawable.is_empty() {
        return;
    }

    let (width, height) = image.dimensions();
    let Some(mut mask) = Pixmap::new(width, height) else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: stroke_width(width),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    let w = width as f32;
    let h = height as f32;
    for path in drawable {
        let points = path.points();
        let mut builder = PathBuilder::new();
        builder.move_to(points[0].x as f32 / 100.0 * w, points[0].y as f32 / 100.0 * h);
        for point in &points[1..] {
            builder.line_to(point.x as f32 / 100.0 * w, point.y as f32 / 100.0 * h);
        }

        // Zero-length strokes have no bounds and produce no path
        if let Some(path) = builder.finish() {
            mask.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    for (pixel, mask_px) in image.pixels_mut().zip(mask.data().chunks_exact(4)) {
        let coverage = u32::from(mask_px[3]);
        if coverage == 0 {
            continue;
        }
        let alpha = u32::from(pixel[3]) * (255 - coverage);
        let alpha = ((alpha + 127) / 255) as u8;
        if alpha == 0 {
            pixel.0 = [0, 0, 0, 0];
        } else {
            pixel[3] = alpha;
        }
    }
}
