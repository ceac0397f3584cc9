//! Source bitmap decoding for Slidecut.
//!
//! This module turns an uploaded slide screenshot (JPEG or PNG, raw bytes or
//! base64) into a [`SourceImage`]: straight RGBA pixels plus the natural size
//! the coordinate transforms scale against.
//!
//! # Architecture
//!
//! Decoding happens once per loaded document. The resulting image is shared
//! read-only across every element's composite call.
//!
//! # Examples
//!
//! ```ignore
//! use slidecut_core::decode::decode_source;
//!
//! let bytes = std::fs::read("slide.png").unwrap();
//! let source = decode_source(&bytes).unwrap();
//! println!("Decoded {}x{} screenshot", source.width(), source.height());
//! ```

mod source;
mod types;

pub use source::{decode_source, decode_source_base64};
pub use types::{DecodeError, SourceImage};
