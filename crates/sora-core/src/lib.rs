//! Sora Core - target-size image compression
//!
//! This crate provides the compression core for Sora Convert: codec
//! identifiers, raster encoders, the bounded quality search that fits encoded
//! output into a byte budget, and the export dispatch built on top of it.
//!
//! Pixel work (resizing, filters, crop) happens in the host before a surface
//! reaches this crate; the search only ever encodes and measures.

pub mod codec;
pub mod encode;
pub mod export;
pub mod search;
pub mod surface;
pub mod units;

pub use codec::{Codec, CodecError};
pub use encode::{EncodeError, RasterSurface};
pub use export::{
    export, export_async, export_batch, output_file_name, BatchEntry, BatchReport,
    CompressionSettings, ExportError, ExportedImage,
};
pub use search::{
    search, search_async, search_async_with_cancel, search_with_cancel, Bisection, EncodeProbe,
    SearchError, SearchParams, SearchResult,
};
pub use surface::{AsyncEncodeSurface, EncodeSurface, EncodedBlob};
