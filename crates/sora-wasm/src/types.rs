//! WASM-compatible wrapper types and argument conversions.
//!
//! This module provides the JavaScript-facing surface type and the helpers that
//! turn loosely typed JS arguments (format strings, plain option objects,
//! numeric byte counts) into core types.

use sora_core::{Codec, CompressionSettings, RasterSurface, SearchParams};
use wasm_bindgen::prelude::*;

/// An RGB raster that can be encoded from JavaScript.
///
/// # Memory Management
///
/// Pixel data lives in WASM memory. Reading `pixels` copies it out to a
/// `Uint8Array`; keep the surface on the WASM side while searching.
#[wasm_bindgen]
pub struct JsRasterSurface {
    inner: RasterSurface,
}

#[wasm_bindgen]
impl JsRasterSurface {
    /// Create a surface from RGB pixel data (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRasterSurface, JsValue> {
        RasterSurface::new(width, height, pixels)
            .map(|inner| JsRasterSurface { inner })
            .map_err(to_js_error)
    }

    /// Create a surface from canvas `ImageData` bytes (RGBA); alpha is dropped.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<JsRasterSurface, JsValue> {
        RasterSurface::from_rgba(width, height, rgba)
            .map(|inner| JsRasterSurface { inner })
            .map_err(to_js_error)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes in the RGB buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }
}

impl JsRasterSurface {
    pub(crate) fn inner(&self) -> &RasterSurface {
        &self.inner
    }
}

/// Render any displayable error as a JS string value.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Parse a format or MIME string into a codec.
pub(crate) fn parse_codec(format: &str) -> Result<Codec, String> {
    format.parse::<Codec>().map_err(|e| e.to_string())
}

/// Convert a JS byte count to `u64`; negative, NaN and infinite values become 0.
pub(crate) fn bytes_from_js(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

/// Read optional search parameters; `undefined`/`null` give the defaults.
pub(crate) fn params_from_js(value: JsValue) -> Result<SearchParams, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(SearchParams::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(to_js_error)
}

/// Read compression settings from a plain object such as
/// `{ method: "size", format: "jpeg", target_megabytes: 1.5 }`.
pub(crate) fn settings_from_js(value: JsValue) -> Result<CompressionSettings, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CompressionSettings::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_wrapper_exposes_dimensions() {
        let surface = JsRasterSurface {
            inner: RasterSurface::new(4, 2, vec![0u8; 4 * 2 * 3]).unwrap(),
        };
        assert_eq!(surface.width(), 4);
        assert_eq!(surface.height(), 2);
        assert_eq!(surface.byte_length(), 24);
        assert_eq!(surface.pixels().len(), 24);
    }

    #[test]
    fn test_parse_codec() {
        assert_eq!(parse_codec("jpeg"), Ok(Codec::Jpeg));
        assert_eq!(parse_codec("image/webp"), Ok(Codec::WebP));
        assert!(parse_codec("tiff").unwrap_err().contains("tiff"));
    }

    #[test]
    fn test_bytes_from_js() {
        assert_eq!(bytes_from_js(300_000.0), 300_000);
        assert_eq!(bytes_from_js(1_572_864.7), 1_572_864);
        assert_eq!(bytes_from_js(-5.0), 0);
        assert_eq!(bytes_from_js(f64::NAN), 0);
        assert_eq!(bytes_from_js(f64::INFINITY), 0);
    }
}
