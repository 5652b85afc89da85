//! Encode surface abstractions.
//!
//! The target-size search treats the encoder as a black box: it hands a
//! surface a codec and a quality, and gets back something whose byte length
//! it can compare against the budget. Hosts implement [`EncodeSurface`] when
//! encoding is synchronous (the raster encoder in [`crate::encode`]) and
//! [`AsyncEncodeSurface`] when each encode is a suspension point (a browser
//! canvas `toBlob`).

use crate::codec::Codec;
use std::fmt::Display;

/// An encoded output whose size can be measured.
pub trait EncodedBlob {
    /// Size of the encoded output in bytes.
    fn byte_len(&self) -> u64;
}

impl EncodedBlob for Vec<u8> {
    fn byte_len(&self) -> u64 {
        self.len() as u64
    }
}

impl EncodedBlob for Box<[u8]> {
    fn byte_len(&self) -> u64 {
        self.len() as u64
    }
}

/// A surface that encodes synchronously.
pub trait EncodeSurface {
    /// Encoded output produced by a successful probe.
    type Blob: EncodedBlob;
    /// Failure reported by a single probe.
    type Error: Display;

    /// Encode the surface with `codec` at `quality` (in `(0, 1]`).
    fn encode(&self, codec: Codec, quality: f64) -> Result<Self::Blob, Self::Error>;
}

/// A surface whose encode completes asynchronously.
///
/// The returned futures are not required to be `Send`: browser encoders are
/// single-threaded and the search awaits each probe before issuing the next.
#[allow(async_fn_in_trait)]
pub trait AsyncEncodeSurface {
    /// Encoded output produced by a successful probe.
    type Blob: EncodedBlob;
    /// Failure reported by a single probe.
    type Error: Display;

    /// Encode the surface with `codec` at `quality` (in `(0, 1]`).
    async fn encode(&self, codec: Codec, quality: f64) -> Result<Self::Blob, Self::Error>;
}
