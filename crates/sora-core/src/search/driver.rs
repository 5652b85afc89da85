//! Search drivers over sync and async surfaces.

use super::bisect::{Bisection, SearchResult};
use super::params::{SearchError, SearchParams};
use crate::codec::Codec;
use crate::surface::{AsyncEncodeSurface, EncodeSurface};

/// Find the highest-quality encode of `surface` that fits in `target_bytes`.
///
/// # Errors
///
/// Only invalid `params` are errors. Failed probes are absorbed, and an
/// unreachable target comes back as a result with no `best`.
pub fn search<S: EncodeSurface>(
    surface: &S,
    target_bytes: u64,
    codec: Codec,
    params: &SearchParams,
) -> Result<SearchResult<S::Blob>, SearchError> {
    search_with_cancel(surface, target_bytes, codec, params, || false)
}

/// Like [`search`], but checks `should_cancel` before every probe.
///
/// When it returns `true` the search stops and returns the best candidate so
/// far with `cancelled` set.
pub fn search_with_cancel<S, F>(
    surface: &S,
    target_bytes: u64,
    codec: Codec,
    params: &SearchParams,
    mut should_cancel: F,
) -> Result<SearchResult<S::Blob>, SearchError>
where
    S: EncodeSurface,
    F: FnMut() -> bool,
{
    let mut bisection = Bisection::new(target_bytes, params)?;

    while let Some(quality) = bisection.next_quality() {
        if should_cancel() {
            return Ok(bisection.finish(true));
        }
        let outcome = surface.encode(codec, quality);
        bisection.record(quality, outcome);
    }

    Ok(bisection.finish(false))
}

/// Async counterpart of [`search`]; each probe is awaited before the next.
pub async fn search_async<S: AsyncEncodeSurface>(
    surface: &S,
    target_bytes: u64,
    codec: Codec,
    params: &SearchParams,
) -> Result<SearchResult<S::Blob>, SearchError> {
    search_async_with_cancel(surface, target_bytes, codec, params, || false).await
}

/// Async counterpart of [`search_with_cancel`].
pub async fn search_async_with_cancel<S, F>(
    surface: &S,
    target_bytes: u64,
    codec: Codec,
    params: &SearchParams,
    mut should_cancel: F,
) -> Result<SearchResult<S::Blob>, SearchError>
where
    S: AsyncEncodeSurface,
    F: FnMut() -> bool,
{
    let mut bisection = Bisection::new(target_bytes, params)?;

    while let Some(quality) = bisection.next_quality() {
        if should_cancel() {
            return Ok(bisection.finish(true));
        }
        let outcome = surface.encode(codec, quality).await;
        bisection.record(quality, outcome);
    }

    Ok(bisection.finish(false))
}


#[cfg(test)]
mod proptests {
    use super::super::testing::{linear_megabyte, CurveSurface, SizedBlob};
    use super::*;
    use proptest::prelude::*;

    /// Non-decreasing size curves: `offset + slope * q^exponent`.
    fn monotone_curve() -> impl Strategy<Value = (u64, u64, f64)> {
        (0u64..50_000, 1_000u64..5_000_000, 0.25f64..4.0)
    }

    fn curve(offset: u64, slope: u64, exponent: f64) -> impl Fn(f64) -> u64 {
        move |q: f64| offset + (slope as f64 * q.powf(exponent)).round() as u64
    }

    proptest! {
        /// Property: with a monotone curve, the answer is the highest probed
        /// quality that fit.
        #[test]
        fn prop_returns_highest_fitting_probe(
            (offset, slope, exponent) in monotone_curve(),
            fraction in 0.0f64..=1.0,
        ) {
            let surface = CurveSurface::new(curve(offset, slope, exponent));
            let low = surface.size_at(0.1);
            let high = surface.size_at(1.0);
            let target = low + ((high - low) as f64 * fraction) as u64;

            let result = search(&surface, target, Codec::Jpeg, &SearchParams::default()).unwrap();
            let best_fitting = surface
                .probes()
                .into_iter()
                .filter(|&q| surface.size_at(q) <= target)
                .fold(None, |acc: Option<f64>, q| Some(acc.map_or(q, |a| a.max(q))));

            prop_assert_eq!(result.quality(), best_fitting);
        }

        /// Property: a target at or above the floor's output is always met.
        #[test]
        fn prop_reachable_target_always_found(
            (offset, slope, exponent) in monotone_curve(),
            headroom in 0u64..2_000_000,
        ) {
            let surface = CurveSurface::new(curve(offset, slope, exponent));
            let target = surface.size_at(0.1) + headroom;

            let result = search(&surface, target, Codec::Jpeg, &SearchParams::default()).unwrap();
            prop_assert!(result.best.is_some(), "probes: {:?}", surface.probes());
        }

        /// Property: a target below the floor's output is never met.
        #[test]
        fn prop_unreachable_target_is_absent(
            (offset, slope, exponent) in monotone_curve(),
            shortfall in 1u64..1_000,
        ) {
            let surface = CurveSurface::new(curve(offset, slope, exponent));
            let target = surface.size_at(0.1).saturating_sub(shortfall);
            prop_assume!(target < surface.size_at(0.1));

            let result = search(&surface, target, Codec::Jpeg, &SearchParams::default()).unwrap();
            prop_assert!(result.best.is_none());
            prop_assert!(result.attempts_used <= 10);
        }

        /// Property: attempts never exceed the configured bound, and no probe
        /// over budget leaks out, even for noisy curves.
        #[test]
        fn prop_bounded_and_never_oversize(
            sizes in prop::collection::vec(0u64..1_000_000, 64),
            target in 0u64..1_000_000,
            max_attempts in 1u32..=20,
            quality_min in 0.01f64..=0.5,
            fail_at in prop::option::of(0usize..20),
        ) {
            let noisy = move |q: f64| sizes[((q * 1e6) as usize) % sizes.len()];
            let mut surface = CurveSurface::new(noisy);
            if let Some(index) = fail_at {
                surface = surface.failing_at(index);
            }

            let mut params = SearchParams::default();
            params.max_attempts = max_attempts;
            params.quality_min = quality_min;

            let result = search(&surface, target, Codec::Jpeg, &params).unwrap();

            prop_assert!(result.attempts_used <= max_attempts);
            prop_assert_eq!(result.attempts_used as usize, surface.probes().len());
            if let Some(best) = &result.best {
                prop_assert!(best.size <= target);
                prop_assert_eq!(best.blob, SizedBlob(best.size));
                prop_assert!(best.quality >= quality_min && best.quality <= 1.0);
            }
        }

        /// Property: every probe stays inside the configured quality window.
        #[test]
        fn prop_probes_stay_in_window(
            target in 0u64..1_200_000,
            quality_min in 0.01f64..=0.9,
            width in 0.0f64..=1.0,
        ) {
            let quality_max = (quality_min + width).min(1.0);
            let surface = CurveSurface::new(linear_megabyte);

            let mut params = SearchParams::default();
            params.quality_min = quality_min;
            params.quality_max = quality_max;

            search(&surface, target, Codec::Jpeg, &params).unwrap();
            for q in surface.probes() {
                prop_assert!(q >= quality_min && q <= quality_max, "probe {} outside window", q);
            }
        }
    }
}
