//! Bisection state shared by the sync and async search drivers.
//!
//! The search is a loop of "ask for a quality, encode, report the outcome".
//! [`Bisection`] owns everything that loop needs (`low`, `high`, the attempt
//! count and the best candidate) so the drivers only differ in how they wait
//! for the encoder. Hosts with their own event loop can drive it directly.

use super::params::{SearchError, SearchParams};
use crate::surface::EncodedBlob;
use std::fmt::Display;

/// One encode that fit the budget.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeProbe<B> {
    /// Quality the blob was encoded at
    pub quality: f64,
    /// Encoded size in bytes
    pub size: u64,
    /// The encoded output
    pub blob: B,
}

/// Outcome of a target-size search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<B> {
    /// Highest-quality probe found within budget, if any
    pub best: Option<EncodeProbe<B>>,
    /// Number of encodes issued
    pub attempts_used: u32,
    /// Whether the caller stopped the search early
    pub cancelled: bool,
}

impl<B> SearchResult<B> {
    /// Borrow the winning blob.
    pub fn blob(&self) -> Option<&B> {
        self.best.as_ref().map(|probe| &probe.blob)
    }

    /// Take the winning blob.
    pub fn into_blob(self) -> Option<B> {
        self.best.map(|probe| probe.blob)
    }

    /// Quality of the winning probe.
    pub fn quality(&self) -> Option<f64> {
        self.best.as_ref().map(|probe| probe.quality)
    }

    /// Size of the winning probe in bytes.
    pub fn size(&self) -> Option<u64> {
        self.best.as_ref().map(|probe| probe.size)
    }

    /// True when the search ran to completion without fitting the budget.
    pub fn is_unreachable(&self) -> bool {
        self.best.is_none() && !self.cancelled
    }
}

/// Bounded bisection over encoder quality.
#[derive(Debug)]
pub struct Bisection<B> {
    target_bytes: u64,
    low: f64,
    high: f64,
    step: f64,
    quality_min: f64,
    max_attempts: u32,
    floor_probe: bool,
    floor_probed: bool,
    attempts: u32,
    best: Option<EncodeProbe<B>>,
}

impl<B: EncodedBlob> Bisection<B> {
    /// Start a search for output no larger than `target_bytes`.
    pub fn new(target_bytes: u64, params: &SearchParams) -> Result<Self, SearchError> {
        params.validate()?;

        Ok(Self {
            target_bytes,
            low: params.quality_min,
            high: params.quality_max,
            step: params.step,
            quality_min: params.quality_min,
            max_attempts: params.max_attempts,
            floor_probe: params.floor_probe,
            floor_probed: false,
            attempts: 0,
            best: None,
        })
    }

    /// Quality to probe next, or `None` once the search is over.
    ///
    /// While the window is open this is its midpoint. When the window closes
    /// with no candidate and budget left, the floor itself is probed once.
    pub fn next_quality(&self) -> Option<f64> {
        if self.attempts >= self.max_attempts {
            return None;
        }

        if self.low <= self.high {
            return Some((self.low + self.high) / 2.0);
        }

        if self.floor_probe && self.best.is_none() && !self.floor_probed {
            return Some(self.quality_min);
        }

        None
    }

    /// Record the outcome of probing `quality`.
    ///
    /// A failed encode counts as over budget: the upper bound tightens and the
    /// search carries on.
    pub fn record<E: Display>(&mut self, quality: f64, outcome: Result<B, E>) {
        self.attempts += 1;
        if quality <= self.quality_min {
            self.floor_probed = true;
        }

        let blob = match outcome {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!(
                    "probe {}/{} at quality {:.4} failed, treating as over budget: {}",
                    self.attempts,
                    self.max_attempts,
                    quality,
                    e
                );
                self.high = quality - self.step;
                return;
            }
        };

        let size = blob.byte_len();
        let fits = size <= self.target_bytes;
        log::debug!(
            "probe {}/{} at quality {:.4}: {} bytes ({} target {})",
            self.attempts,
            self.max_attempts,
            quality,
            size,
            if fits { "within" } else { "over" },
            self.target_bytes
        );

        if fits {
            self.best = Some(EncodeProbe {
                quality,
                size,
                blob,
            });
            self.low = quality + self.step;
        } else {
            self.high = quality - self.step;
        }
    }

    /// Number of probes recorded so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Best candidate so far.
    pub fn best(&self) -> Option<&EncodeProbe<B>> {
        self.best.as_ref()
    }

    /// Finish the search and hand back the best candidate.
    pub fn finish(self, cancelled: bool) -> SearchResult<B> {
        match &self.best {
            Some(probe) => log::info!(
                "target {} bytes: quality {:.4} -> {} bytes after {} probes{}",
                self.target_bytes,
                probe.quality,
                probe.size,
                self.attempts,
                if cancelled { " (cancelled)" } else { "" }
            ),
            None if cancelled => log::info!(
                "target {} bytes: cancelled after {} probes with no candidate",
                self.target_bytes,
                self.attempts
            ),
            None => log::info!(
                "target {} bytes unreachable after {} probes",
                self.target_bytes,
                self.attempts
            ),
        }

        SearchResult {
            best: self.best,
            attempts_used: self.attempts,
            cancelled,
        }
    }
}
