//! Canvas-backed search.
//!
//! Browsers encode a canvas with `HTMLCanvasElement.toBlob(callback, type,
//! quality)`, which completes asynchronously. [`CanvasSurface`] wraps that
//! call as an [`AsyncEncodeSurface`] so the core search can await each probe.
//! A `null` blob (the browser could not encode) is reported as a failed probe,
//! which the search treats as over budget.
//!
//! # Example
//!
//! ```typescript
//! const controller = new AbortController();
//! const result = await compress_canvas_to_target_size(
//!   canvas, 2 * 1024 * 1024, 'webp', undefined, controller.signal);
//! if (result.blob) saveAs(result.blob, name);
//! ```

use crate::search::{JsExportedImage, JsSearchResult};
use crate::types::{bytes_from_js, params_from_js, parse_codec, settings_from_js, to_js_error};
use sora_core::{export_async, search_async_with_cancel, AsyncEncodeSurface, Codec, EncodedBlob};
use std::fmt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortSignal, Blob, HtmlCanvasElement};

/// Why a single canvas encode produced no blob.
#[derive(Debug)]
pub enum CanvasProbeError {
    /// `toBlob` threw or the promise rejected
    Js(String),
    /// The browser handed back `null`
    NoBlob,
    /// The callback received something other than a Blob
    NotABlob,
}

impl fmt::Display for CanvasProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasProbeError::Js(msg) => write!(f, "toBlob failed: {msg}"),
            CanvasProbeError::NoBlob => f.write_str("toBlob returned null"),
            CanvasProbeError::NotABlob => f.write_str("toBlob returned a non-Blob value"),
        }
    }
}

impl From<JsValue> for CanvasProbeError {
    fn from(value: JsValue) -> Self {
        CanvasProbeError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// A Blob produced by `toBlob`.
pub struct CanvasBlob(pub Blob);

impl EncodedBlob for CanvasBlob {
    fn byte_len(&self) -> u64 {
        self.0.size() as u64
    }
}

/// An `HTMLCanvasElement` encoded through `toBlob`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl AsyncEncodeSurface for CanvasSurface {
    type Blob = CanvasBlob;
    type Error = CanvasProbeError;

    async fn encode(&self, codec: Codec, quality: f64) -> Result<CanvasBlob, CanvasProbeError> {
        let mut issue = |resolve: js_sys::Function, reject: js_sys::Function| {
            let quality = JsValue::from_f64(quality);
            if let Err(e) =
                self.canvas
                    .to_blob_with_type_and_encoder_options(&resolve, codec.mime(), &quality)
            {
                let _ = reject.call1(&JsValue::NULL, &e);
            }
        };
        let promise = js_sys::Promise::new(&mut issue);

        let value = JsFuture::from(promise).await?;
        if value.is_null() || value.is_undefined() {
            return Err(CanvasProbeError::NoBlob);
        }
        value
            .dyn_into::<Blob>()
            .map(CanvasBlob)
            .map_err(|_| CanvasProbeError::NotABlob)
    }
}

/// Search for the highest canvas encode quality that fits in `target_bytes`.
///
/// Resolves to a `JsSearchResult` whose `blob` is set when a quality fit.
/// Aborting `signal` stops the search before its next probe and resolves with
/// the best blob found so far.
#[wasm_bindgen]
pub async fn compress_canvas_to_target_size(
    canvas: HtmlCanvasElement,
    target_bytes: f64,
    format: String,
    params: JsValue,
    signal: Option<AbortSignal>,
) -> Result<JsSearchResult, JsValue> {
    let codec = parse_codec(&format).map_err(to_js_error)?;
    let params = params_from_js(params)?;
    let surface = CanvasSurface::new(canvas);

    let result = search_async_with_cancel(
        &surface,
        bytes_from_js(target_bytes),
        codec,
        &params,
        || signal.as_ref().is_some_and(AbortSignal::aborted),
    )
    .await
    .map_err(to_js_error)?;

    Ok(JsSearchResult::from_blob(unwrap_blobs(result)))
}

/// Export a canvas according to a compression settings object.
#[wasm_bindgen]
pub async fn export_canvas(
    canvas: HtmlCanvasElement,
    settings: JsValue,
) -> Result<JsExportedImage, JsValue> {
    let settings = settings_from_js(settings)?;
    let surface = CanvasSurface::new(canvas);

    let exported = export_async(&surface, &settings)
        .await
        .map_err(to_js_error)?;

    Ok(JsExportedImage::from_blob(sora_core::ExportedImage {
        blob: exported.blob.0,
        codec: exported.codec,
        quality: exported.quality,
        attempts: exported.attempts,
    }))
}

fn unwrap_blobs(result: sora_core::SearchResult<CanvasBlob>) -> sora_core::SearchResult<Blob> {
    sora_core::SearchResult {
        best: result.best.map(|probe| sora_core::EncodeProbe {
            quality: probe.quality,
            size: probe.size,
            blob: probe.blob.0,
        }),
        attempts_used: result.attempts_used,
        cancelled: result.cancelled,
    }
}
