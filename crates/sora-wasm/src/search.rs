//! Target-size search and export bindings over in-memory surfaces.
//!
//! # Example
//!
//! ```typescript
//! const result = compress_to_target_size(surface, 500 * 1024, 'jpeg', { max_attempts: 12 });
//! if (result.unreachable) {
//!   showStatus('Could not compress to target size', 'error');
//! } else {
//!   download(new Blob([result.bytes], { type: 'image/jpeg' }));
//! }
//! ```

use crate::types::{
    bytes_from_js, params_from_js, parse_codec, settings_from_js, to_js_error, JsRasterSurface,
};
use sora_core::{export, search, ExportedImage, SearchResult};
use wasm_bindgen::prelude::*;
use web_sys::Blob;

/// Result of a target-size search.
///
/// Exactly one of `bytes` (in-memory surfaces) or `blob` (canvas surfaces) is
/// set when a quality fit the budget; both are empty otherwise.
#[wasm_bindgen]
pub struct JsSearchResult {
    bytes: Option<Vec<u8>>,
    blob: Option<Blob>,
    quality: Option<f64>,
    size: Option<f64>,
    attempts_used: u32,
    cancelled: bool,
}

#[wasm_bindgen]
impl JsSearchResult {
    /// Encoded bytes of the winning probe
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.bytes.clone()
    }

    /// Encoded Blob of the winning probe (canvas searches)
    #[wasm_bindgen(getter)]
    pub fn blob(&self) -> Option<Blob> {
        self.blob.clone()
    }

    /// Quality of the winning probe
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> Option<f64> {
        self.quality
    }

    /// Size of the winning probe in bytes
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> Option<f64> {
        self.size
    }

    /// Number of encodes issued
    #[wasm_bindgen(getter)]
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Whether the search was aborted
    #[wasm_bindgen(getter)]
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// True when no quality fit the budget
    #[wasm_bindgen(getter)]
    pub fn unreachable(&self) -> bool {
        self.quality.is_none() && !self.cancelled
    }
}

impl JsSearchResult {
    pub(crate) fn from_bytes(result: SearchResult<Vec<u8>>) -> Self {
        Self::build(result, |bytes| (Some(bytes), None))
    }

    pub(crate) fn from_blob(result: SearchResult<Blob>) -> Self {
        Self::build(result, |blob| (None, Some(blob)))
    }

    fn build<B>(result: SearchResult<B>, split: impl FnOnce(B) -> (Option<Vec<u8>>, Option<Blob>)) -> Self {
        let attempts_used = result.attempts_used;
        let cancelled = result.cancelled;
        match result.best {
            Some(probe) => {
                let (bytes, blob) = split(probe.blob);
                Self {
                    bytes,
                    blob,
                    quality: Some(probe.quality),
                    size: Some(probe.size as f64),
                    attempts_used,
                    cancelled,
                }
            }
            None => Self {
                bytes: None,
                blob: None,
                quality: None,
                size: None,
                attempts_used,
                cancelled,
            },
        }
    }
}

/// An exported image.
#[wasm_bindgen]
pub struct JsExportedImage {
    bytes: Option<Vec<u8>>,
    blob: Option<Blob>,
    format: String,
    mime: String,
    quality: f64,
    attempts: u32,
}

#[wasm_bindgen]
impl JsExportedImage {
    /// Encoded bytes (in-memory surfaces)
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.bytes.clone()
    }

    /// Encoded Blob (canvas surfaces)
    #[wasm_bindgen(getter)]
    pub fn blob(&self) -> Option<Blob> {
        self.blob.clone()
    }

    /// Output format extension, e.g. `"jpeg"`
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.format.clone()
    }

    /// Output MIME type
    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.mime.clone()
    }

    /// Quality the output was encoded at
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Encodes spent producing the output
    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl JsExportedImage {
    pub(crate) fn from_bytes(image: ExportedImage<Vec<u8>>) -> Self {
        Self::build(image.codec, image.quality, image.attempts, Some(image.blob), None)
    }

    pub(crate) fn from_blob(image: ExportedImage<Blob>) -> Self {
        Self::build(image.codec, image.quality, image.attempts, None, Some(image.blob))
    }

    fn build(
        codec: sora_core::Codec,
        quality: f64,
        attempts: u32,
        bytes: Option<Vec<u8>>,
        blob: Option<Blob>,
    ) -> Self {
        Self {
            bytes,
            blob,
            format: codec.extension().to_string(),
            mime: codec.mime().to_string(),
            quality,
            attempts,
        }
    }
}

/// Find the highest quality whose encoding of `surface` fits in `target_bytes`.
///
/// `params` is an optional object with any of `quality_min`, `quality_max`,
/// `max_attempts`, `step` and `floor_probe`.
///
/// An unreachable target is not an error: check `result.unreachable`.
#[wasm_bindgen]
pub fn compress_to_target_size(
    surface: &JsRasterSurface,
    target_bytes: f64,
    format: &str,
    params: JsValue,
) -> Result<JsSearchResult, JsValue> {
    let codec = parse_codec(format).map_err(to_js_error)?;
    let params = params_from_js(params)?;

    search(surface.inner(), bytes_from_js(target_bytes), codec, &params)
        .map(JsSearchResult::from_bytes)
        .map_err(to_js_error)
}

/// Encode `surface` according to a compression settings object.
///
/// Fails with "Could not compress to target size ..." when a size budget
/// cannot be met.
#[wasm_bindgen]
pub fn export_image(surface: &JsRasterSurface, settings: JsValue) -> Result<JsExportedImage, JsValue> {
    let settings = settings_from_js(settings)?;
    export(surface.inner(), &settings)
        .map(JsExportedImage::from_bytes)
        .map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sora_core::{EncodeProbe, RasterSurface, SearchParams};

    #[test]
    fn test_result_from_found_probe() {
        let result = SearchResult {
            best: Some(EncodeProbe {
                quality: 0.42,
                size: 3,
                blob: vec![1u8, 2, 3],
            }),
            attempts_used: 6,
            cancelled: false,
        };

        let js = JsSearchResult::from_bytes(result);
        assert_eq!(js.bytes(), Some(vec![1, 2, 3]));
        assert_eq!(js.quality(), Some(0.42));
        assert_eq!(js.size(), Some(3.0));
        assert_eq!(js.attempts_used(), 6);
        assert!(!js.unreachable());
    }

    #[test]
    fn test_result_unreachable() {
        let result: SearchResult<Vec<u8>> = SearchResult {
            best: None,
            attempts_used: 7,
            cancelled: false,
        };

        let js = JsSearchResult::from_bytes(result);
        assert!(js.bytes().is_none());
        assert!(js.unreachable());
        assert!(!js.cancelled());
    }

    #[test]
    fn test_search_on_wrapped_surface() {
        let surface = RasterSurface::new(16, 16, vec![77u8; 16 * 16 * 3]).unwrap();
        let result = search(&surface, 1_000_000, sora_core::Codec::Jpeg, &SearchParams::default())
            .unwrap();

        let js = JsSearchResult::from_bytes(result);
        assert!(js.quality().unwrap() > 0.98);
        assert!(js.size().unwrap() <= 1_000_000.0);
    }

    #[test]
    fn test_exported_image_metadata() {
        let image = ExportedImage {
            blob: vec![0u8; 4],
            codec: sora_core::Codec::WebP,
            quality: 1.0,
            attempts: 1,
        };

        let js = JsExportedImage::from_bytes(image);
        assert_eq!(js.format(), "webp");
        assert_eq!(js.mime(), "image/webp");
        assert_eq!(js.bytes().map(|b| b.len()), Some(4));
        assert_eq!(js.attempts(), 1);
    }
}
