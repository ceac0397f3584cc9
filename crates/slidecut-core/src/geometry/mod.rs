//! Coordinate transforms between scene space and bitmap pixel space.
//!
//! Three coordinate systems meet in this crate:
//!
//! - **Scene space**: the normalized 1000 x 562.5 (16:9) space the slide
//!   decomposition produces element positions in.
//! - **Source pixel space**: the pixel grid of the original screenshot.
//! - **Output percentage space**: 0-100 on both axes of a cropped output,
//!   used by erase regions and erase paths.
//!
//! Every caller that needs to know where an edited element visually sits
//! (the overlay, the selection box, the export layout) goes through
//! [`visual_rect`], so the three never drift apart.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner in every space
//! - Pixel conversion floors each coordinate independently

mod transform;
mod types;

pub use transform::{pixel_scale, rect_contains, to_percentage, to_pixel_space, visual_rect};
pub use types::{
    CropInsets, GeometryError, NormalizedRect, PercentRect, PixelRect, PixelScale, SCENE_HEIGHT,
    SCENE_WIDTH,
};
