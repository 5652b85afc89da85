//! Search configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default lower bound of the quality window.
pub const DEFAULT_QUALITY_MIN: f64 = 0.1;
/// Default upper bound of the quality window.
pub const DEFAULT_QUALITY_MAX: f64 = 1.0;
/// Default probe budget.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Default nudge applied to the window bound after each comparison.
pub const DEFAULT_STEP: f64 = 0.01;
/// Fewest probes that reach ~1% quality granularity over the full window
/// (`log2(1 / 0.01)` rounded up).
pub const MIN_CONVERGENT_ATTEMPTS: u32 = 7;

/// Errors raised for search parameters that can never produce a valid probe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Quality bounds fall outside `(0, 1]` or are inverted
    #[error("Invalid quality range [{min}, {max}]: bounds must satisfy 0 < min <= max <= 1")]
    InvalidQualityRange { min: f64, max: f64 },

    /// The bound nudge is not a positive finite number
    #[error("Invalid search step {0}: must be positive and finite")]
    InvalidStep(f64),

    /// No probes allowed at all
    #[error("max_attempts must be at least 1")]
    NoAttempts,
}

/// Tunables for the target-size search.
///
/// Hosts usually pass this as a plain object; every field is optional and
/// falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Lowest quality the search may probe (exclusive of 0)
    pub quality_min: f64,
    /// Highest quality the search may probe
    pub quality_max: f64,
    /// Upper bound on encoder invocations
    pub max_attempts: u32,
    /// Amount the window bound moves past each probed midpoint
    pub step: f64,
    /// Probe `quality_min` directly when the window closes with no candidate
    pub floor_probe: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            quality_min: DEFAULT_QUALITY_MIN,
            quality_max: DEFAULT_QUALITY_MAX,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            step: DEFAULT_STEP,
            floor_probe: true,
        }
    }
}

impl SearchParams {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the parameters before any probe is issued.
    ///
    /// A probe budget below [`MIN_CONVERGENT_ATTEMPTS`] is allowed but logged,
    /// since the search may stop well short of the best quality.
    pub fn validate(&self) -> Result<(), SearchError> {
        let (min, max) = (self.quality_min, self.quality_max);
        let in_domain = |q: f64| q > 0.0 && q <= 1.0;
        if !(in_domain(min) && in_domain(max) && min <= max) {
            return Err(SearchError::InvalidQualityRange { min, max });
        }

        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(SearchError::InvalidStep(self.step));
        }

        if self.max_attempts == 0 {
            return Err(SearchError::NoAttempts);
        }

        if self.max_attempts < MIN_CONVERGENT_ATTEMPTS {
            log::warn!(
                "max_attempts={} is below {}; the search may not converge to 1% quality",
                self.max_attempts,
                MIN_CONVERGENT_ATTEMPTS
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SearchParams::new();
        assert_eq!(params.quality_min, 0.1);
        assert_eq!(params.quality_max, 1.0);
        assert_eq!(params.max_attempts, 10);
        assert_eq!(params.step, 0.01);
        assert!(params.floor_probe);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_quality_min_rejected() {
        let mut params = SearchParams::default();
        params.quality_min = 0.0;
        assert!(matches!(
            params.validate(),
            Err(SearchError::InvalidQualityRange { .. })
        ));
    }

    #[test]
    fn test_quality_max_above_one_rejected() {
        let mut params = SearchParams::default();
        params.quality_max = 1.01;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut params = SearchParams::default();
        params.quality_min = 0.8;
        params.quality_max = 0.5;
        assert_eq!(
            params.validate(),
            Err(SearchError::InvalidQualityRange { min: 0.8, max: 0.5 })
        );
    }

    #[test]
    fn test_nan_quality_rejected() {
        let mut params = SearchParams::default();
        params.quality_max = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_degenerate_range_allowed() {
        let mut params = SearchParams::default();
        params.quality_min = 0.5;
        params.quality_max = 0.5;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_bad_step_rejected() {
        for step in [0.0, -0.01, f64::INFINITY, f64::NAN] {
            let mut params = SearchParams::default();
            params.step = step;
            assert!(matches!(params.validate(), Err(SearchError::InvalidStep(_))));
        }
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut params = SearchParams::default();
        params.max_attempts = 0;
        assert_eq!(params.validate(), Err(SearchError::NoAttempts));
    }

    #[test]
    fn test_small_attempt_budget_allowed() {
        let mut params = SearchParams::default();
        params.max_attempts = 3;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_object() {
        let params: SearchParams =
            serde_json::from_str(r#"{"max_attempts": 12, "quality_min": 0.2}"#).unwrap();
        assert_eq!(params.max_attempts, 12);
        assert_eq!(params.quality_min, 0.2);
        assert_eq!(params.quality_max, DEFAULT_QUALITY_MAX);
        assert_eq!(params.step, DEFAULT_STEP);
    }
}
