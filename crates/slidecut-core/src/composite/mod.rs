//! Region compositor: crop and edit one element's raster out of the source.
//!
//! # Pipeline Order
//!
//! The steps run in a fixed order; reordering changes the output:
//! 1. Region to source pixel space
//! 2. Inflate (outward only)
//! 3. Crop insets, scaled like the region
//! 4. Clamp to the bitmap, minimum 1x1
//! 5. Copy the window into a fresh surface
//! 6. Erase regions
//! 7. Erase paths
//! 8. Edge feather
//! 9. PNG encode
//!
//! # Purity
//!
//! Every call recomputes from the original source. Nothing is cached here and
//! neither the source nor the options are mutated, so identical inputs give
//! byte-identical output.

mod erase;
mod feather;
mod options;
mod region;
mod result;

use image::RgbaImage;
use thiserror::Error;

use crate::decode::{decode_source, DecodeError, SourceImage};
use crate::encode::{encode_png, EncodeError};
use crate::geometry::{GeometryError, NormalizedRect};

pub use erase::{clear_regions, erase_paths, stroke_width};
pub use feather::{edge_factor, feather_edges};
pub use options::{
    CompositeOptions, ErasePath, ErasePoint, EraseRegion, DEFAULT_FEATHER, DEFAULT_INFLATE_PX,
    REMOVE_BG_FEATHER,
};
pub use region::{crop_window, extract};
pub use result::CompositedImage;

/// Errors from a single composite call. Local to one element.
#[derive(Debug, Error)]
pub enum CompositeError {
    /// The source bitmap could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The natural size passed in is not usable.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The output surface could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Run pipeline steps 1-8 and return the edited surface.
///
/// # Errors
///
/// Returns [`CompositeError::Geometry`] if the natural size is not positive or
/// the crop window is too large to allocate.
pub fn render_region(
    source: &SourceImage,
    natural_width: f64,
    natural_height: f64,
    region: &NormalizedRect,
    options: &CompositeOptions,
) -> Result<RgbaImage, CompositeError> {
    let window = crop_window(
        region,
        natural_width,
        natural_height,
        options.effective_inflate(),
        &options.crop_insets,
    )?;

    let mut surface = extract(source.as_rgba(), &window)?;
    clear_regions(&mut surface, &options.erase_regions);
    erase_paths(&mut surface, &options.erase_paths);
    feather_edges(&mut surface, options.effective_feather());

    Ok(surface)
}

/// Composite one element's region out of a decoded source.
///
/// # Errors
///
/// Returns [`CompositeError::Geometry`] for a non-positive natural size and
/// [`CompositeError::Encode`] if PNG encoding fails.
#[tracing::instrument(
    level = "debug",
    skip(source, options),
    fields(erase_paths = options.erase_paths.len())
)]
pub fn composite(
    source: &SourceImage,
    natural_width: f64,
    natural_height: f64,
    region: &NormalizedRect,
    options: &CompositeOptions,
) -> Result<CompositedImage, CompositeError> {
    let surface = render_region(source, natural_width, natural_height, region, options)?;
    let (width, height) = surface.dimensions();
    let png = encode_png(surface.as_raw(), width, height)?;
    Ok(CompositedImage::from_png(png, width, height))
}

/// Decode `bytes` and composite one region out of it.
///
/// # Errors
///
/// Returns [`CompositeError::Decode`] if the bytes are not a readable image;
/// otherwise the same errors as [`composite`]. No partial result is produced.
pub fn composite_bytes(
    bytes: &[u8],
    natural_width: f64,
    natural_height: f64,
    region: &NormalizedRect,
    options: &CompositeOptions,
) -> Result<CompositedImage, CompositeError> {
    let source = decode_source(bytes)?;
    composite(&source, natural_width, natural_height, region, options)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
