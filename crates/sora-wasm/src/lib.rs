//! Sora WASM - WebAssembly bindings for Sora Convert
//!
//! This crate exposes the sora-core compression functionality to the browser.
//!
//! # Module Structure
//!
//! - `types` - JS-facing raster surface and argument conversions
//! - `encode` - Single encodes, output naming, size formatting
//! - `search` - Target-size search and export over in-memory surfaces
//! - `canvas` - Async target-size search over `HTMLCanvasElement.toBlob`
//! - `logging` - Console sink for the core's log records
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_canvas_to_target_size } from '@sora/wasm';
//!
//! await init();
//!
//! const result = await compress_canvas_to_target_size(canvas, 1024 * 1024, 'jpeg');
//! if (result.unreachable) {
//!   showStatus('Could not compress to target size', 'error');
//! }
//! ```

use wasm_bindgen::prelude::*;

mod canvas;
mod encode;
mod logging;
mod search;
mod types;

// Re-export public types
pub use canvas::{compress_canvas_to_target_size, export_canvas, CanvasBlob, CanvasSurface};
pub use encode::{encode_image, format_file_size, output_file_name};
pub use logging::set_log_level;
pub use search::{compress_to_target_size, export_image, JsExportedImage, JsSearchResult};
pub use types::JsRasterSurface;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
