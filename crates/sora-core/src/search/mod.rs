//! Target-size compression search.
//!
//! Finds the highest encoder quality whose output fits a byte budget, by
//! bounded bisection over the quality parameter. The encoder is a black box
//! assumed to produce larger output at higher quality; that assumption is not
//! checked, but a probe that misses the budget is never returned.
//!
//! # Algorithm
//!
//! Starting from the window `[quality_min, quality_max]`, each probe encodes
//! at the window midpoint. A fit raises the lower bound to `mid + step`, an
//! overshoot (or failed encode) lowers the upper bound to `mid - step`. The
//! search stops when the window closes or `max_attempts` probes have run. If
//! it closes with nothing found and budget remains, `quality_min` is probed
//! once so a reachable target is never reported unreachable.
//!
//! # Examples
//!
//! ```ignore
//! use sora_core::encode::RasterSurface;
//! use sora_core::search::{search, SearchParams};
//! use sora_core::Codec;
//!
//! let surface = RasterSurface::new(640, 480, pixels)?;
//! let result = search(&surface, 200 * 1024, Codec::Jpeg, &SearchParams::default())?;
//! match result.into_blob() {
//!     Some(jpeg) => save(jpeg),
//!     None => eprintln!("could not compress to target size"),
//! }
//! ```

mod bisect;
mod driver;
mod params;
#[cfg(test)]
mod testing;

pub use bisect::{Bisection, EncodeProbe, SearchResult};
pub use driver::{search, search_async, search_async_with_cancel, search_with_cancel};
pub use params::{
    SearchError, SearchParams, DEFAULT_MAX_ATTEMPTS, DEFAULT_QUALITY_MAX, DEFAULT_QUALITY_MIN,
    DEFAULT_STEP, MIN_CONVERGENT_ATTEMPTS,
};
