//! Synthetic surfaces for exercising the search without a real encoder.

use crate::codec::Codec;
use crate::surface::{AsyncEncodeSurface, EncodeSurface, EncodedBlob};
use std::cell::{Cell, RefCell};

/// A blob that only carries its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizedBlob(pub u64);

impl EncodedBlob for SizedBlob {
    fn byte_len(&self) -> u64 {
        self.0
    }
}

/// Surface whose output size is `size_fn(quality)`.
///
/// Every probed quality is recorded. `fail_at` makes the n-th probe
/// (zero-based) report an encoder failure instead of a blob.
pub struct CurveSurface<F> {
    size_fn: F,
    fail_at: Option<usize>,
    probes: RefCell<Vec<f64>>,
    calls: Cell<usize>,
}

impl<F: Fn(f64) -> u64> CurveSurface<F> {
    pub fn new(size_fn: F) -> Self {
        Self {
            size_fn,
            fail_at: None,
            probes: RefCell::new(Vec::new()),
            calls: Cell::new(0),
        }
    }

    pub fn failing_at(mut self, probe_index: usize) -> Self {
        self.fail_at = Some(probe_index);
        self
    }

    pub fn probes(&self) -> Vec<f64> {
        self.probes.borrow().clone()
    }

    pub fn size_at(&self, quality: f64) -> u64 {
        (self.size_fn)(quality)
    }

    fn probe(&self, quality: f64) -> Result<SizedBlob, String> {
        let index = self.calls.get();
        self.calls.set(index + 1);
        self.probes.borrow_mut().push(quality);

        if self.fail_at == Some(index) {
            return Err(format!("synthetic failure at probe {index}"));
        }
        Ok(SizedBlob((self.size_fn)(quality)))
    }
}

impl<F: Fn(f64) -> u64> EncodeSurface for CurveSurface<F> {
    type Blob = SizedBlob;
    type Error = String;

    fn encode(&self, _codec: Codec, quality: f64) -> Result<SizedBlob, String> {
        self.probe(quality)
    }
}

impl<F: Fn(f64) -> u64> AsyncEncodeSurface for CurveSurface<F> {
    type Blob = SizedBlob;
    type Error = String;

    async fn encode(&self, _codec: Codec, quality: f64) -> Result<SizedBlob, String> {
        self.probe(quality)
    }
}

/// `f(q) = round(q * 1,000,000)`.
pub fn linear_megabyte(quality: f64) -> u64 {
    (quality * 1_000_000.0).round() as u64
}
