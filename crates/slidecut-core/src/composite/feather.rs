//! Edge feathering (pipeline step 8).
//!
//! Each of the four edges fades linearly from fully transparent at the border
//! to untouched `feather` pixels in. The four fades compound the way four
//! successive destination-out gradient fills would, so corners fade faster.
//!
//! Feathering is unconditional: it also runs over pixels an erase pass has
//! already cleared, which leaves them transparent.

use image::RgbaImage;

/// Remaining-alpha factor for a pixel `distance` pixels in from an edge.
///
/// 0.0 at the border row/column, rising linearly to 1.0 at `feather`.
#[inline]
pub fn edge_factor(distance: u32, feather: f32) -> f32 {
    if feather <= 0.0 {
        return 1.0;
    }
    (distance as f32 / feather).min(1.0)
}

/// Fade all four edges of the image in place.
///
/// A non-positive `feather` leaves the image untouched.
pub fn feather_edges(image: &mut RgbaImage, feather: f32) {
    if feather.is_nan() || feather <= 0.0 {
        return;
    }

    let (width, height) = image.dimensions();
    let column_factors: Vec<f32> = (0..width)
        .map(|x| edge_factor(x, feather) * edge_factor(width - 1 - x, feather))
        .collect();

    for y in 0..height {
        let row_factor = edge_factor(y, feather) * edge_factor(height - 1 - y, feather);

        for (x, col_factor) in column_factors.iter().enumerate() {
            let factor = row_factor * col_factor;
            if factor >= 1.0 {
                continue;
            }

            let pixel = image.get_pixel_mut(x as u32, y);
            let alpha = (f32::from(pixel[3]) * factor).round() as u8;
            if alpha == 0 {
                pixel.0 = [0, 0, 0, 0];
            } else {
                pixel[3] = alpha;
            }
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: alpha rises strictly from 0 at the border up to full
        /// opacity `feather` pixels in, along every edge.
        #[test]
        fn prop_feather_strictly_increasing(
            feather in 1u32..=8,
            size in 24u32..=48,
        ) {
            let mut img = RgbaImage::from_pixel(size, size, image::Rgba([1, 2, 3, 255]));
            feather_edges(&mut img, feather as f32);

            let mid = size / 2;
            let ramp: Vec<u8> = (0..=feather).map(|x| img.get_pixel(x, mid).0[3]).collect();

            prop_assert_eq!(ramp[0], 0);
            prop_assert_eq!(ramp[feather as usize], 255);
            for pair in ramp.windows(2) {
                prop_assert!(pair[0] < pair[1], "ramp not strictly increasing: {:?}", ramp);
            }
        }

        /// Property: feathering never raises alpha.
        #[test]
        fn prop_feather_never_adds_alpha(
            feather in 0.0f32..10.0,
            alpha in any::<u8>(),
        ) {
            let mut img = RgbaImage::from_pixel(16, 16, image::Rgba([5, 5, 5, alpha]));
            feather_edges(&mut img, feather);
            prop_assert!(img.pixels().all(|p| p[3] <= alpha));
        }
    }
}
