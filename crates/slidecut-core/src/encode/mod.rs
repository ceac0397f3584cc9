//! Image encoding for composited element rasters.
//!
//! This module provides functionality for:
//! - Encoding RGBA buffers to PNG
//! - Producing the base64 payload and data URL the editor and the deck
//!   serializer consume
//!
//! # Examples
//!
//! ```ignore
//! use slidecut_core::encode::{encode_png, to_base64, to_data_url};
//!
//! let pixels = vec![255u8; 4 * 4 * 4];
//! let png = encode_png(&pixels, 4, 4).unwrap();
//! let url = to_data_url(&to_base64(&png));
//! ```

mod png;

pub use png::{encode_png, to_base64, to_data_url, EncodeError, PNG_DATA_URL_PREFIX};
