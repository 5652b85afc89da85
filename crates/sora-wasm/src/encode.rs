//! Encoding and formatting bindings.
//!
//! # Example
//!
//! ```typescript
//! import { JsRasterSurface, encode_image, output_file_name } from '@sora/wasm';
//!
//! const surface = JsRasterSurface.from_rgba(w, h, imageData.data);
//! const jpeg = encode_image(surface, 'jpeg', 0.85);
//! const name = output_file_name('photo.png', 'jpeg', 'converted'); // photo_converted.jpeg
//! ```

use crate::types::{parse_codec, to_js_error, JsRasterSurface};
use sora_core::{export, units};
use wasm_bindgen::prelude::*;

/// Encode a surface with the given format at a quality in `[0, 1]`.
///
/// Quality is ignored for the lossless formats (`png`, `webp`).
#[wasm_bindgen]
pub fn encode_image(surface: &JsRasterSurface, format: &str, quality: f64) -> Result<Vec<u8>, JsValue> {
    let codec = parse_codec(format).map_err(to_js_error)?;
    surface.inner().encode_with(codec, quality).map_err(to_js_error)
}

/// Download name for a converted file, e.g. `photo_converted.jpeg`.
#[wasm_bindgen]
pub fn output_file_name(original: &str, format: &str, suffix: &str) -> Result<String, JsValue> {
    let codec = parse_codec(format).map_err(to_js_error)?;
    Ok(export::output_file_name(original, codec, suffix))
}

/// Human-readable size, e.g. `"1.5 MB"`.
#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    units::format_file_size(crate::types::bytes_from_js(bytes))
}
