//! Raster encoding for export.
//!
//! This module provides functionality for:
//! - Encoding RGB pixel buffers to JPEG with a configurable quality
//! - Lossless PNG and WebP encoding
//! - [`RasterSurface`], an in-memory surface the target-size search can probe
//!
//! All encoders are synchronous and built on the `image` crate.
//!
//! # Examples
//!
//! ```ignore
//! use sora_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod lossless;
mod raster;
mod types;

pub use jpeg::{encode_jpeg, quality_to_percent};
pub use lossless::{encode_png, encode_webp};
pub use raster::RasterSurface;
pub use types::EncodeError;
