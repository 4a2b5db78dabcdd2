//! Weighted moment statistics over a known, finite distribution.
//!
//! All functions here take `(value, probability)` pairs whose
//! probabilities are already normalized. They compute population-level
//! quantities of the distribution itself, never bias-corrected sample
//! estimates.
//!
//! # Algorithms
//!
//! - **Accumulation**: Neumaier compensated summation, so a discretized
//!   density with thousands of tiny masses sums with O(ε) error.
//! - **Variance**: second central moment Σ pᵢ(xᵢ − μ)², evaluated around
//!   the mean rather than via E[X²] − μ², to avoid cancellation.

use crate::error::{DistributionError, Result};

/// Negative variances with magnitude up to this are clamped to zero.
pub const VARIANCE_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Compensated summation
// ---------------------------------------------------------------------------

/// Running Neumaier compensated sum.
///
/// Improved Kahan summation that also handles the case where the addend
/// is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *ZAMM* 54(1), pp. 39–51.
///
/// # Examples
/// ```
/// use u_probability::stats::CompensatedSum;
/// let mut acc = CompensatedSum::new();
/// for _ in 0..10 {
///     acc.add(0.1);
/// }
/// assert_eq!(acc.value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    c: f64,
}

impl CompensatedSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `x` to the running sum.
    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.c += (self.sum - t) + x;
        } else {
            self.c += (x - t) + self.sum;
        }
        self.sum = t;
    }

    /// Returns the compensated total so far.
    pub fn value(&self) -> f64 {
        self.sum + self.c
    }
}

/// Compensated sum of an iterator of values.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn compensated_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut acc = CompensatedSum::new();
    for x in values {
        acc.add(x);
    }
    acc.value()
}

// ---------------------------------------------------------------------------
// Moments
// ---------------------------------------------------------------------------

fn powu(x: f64, k: u32) -> f64 {
    match i32::try_from(k) {
        Ok(k) => x.powi(k),
        Err(_) => x.powf(f64::from(k)),
    }
}

/// Expected value Σ pᵢ·xᵢ.
///
/// # Examples
/// ```
/// use u_probability::stats::expected_value;
/// let pairs = [(0.0, 0.5), (10.0, 0.5)];
/// assert!((expected_value(pairs) - 5.0).abs() < 1e-15);
/// ```
pub fn expected_value<I: IntoIterator<Item = (f64, f64)>>(pairs: I) -> f64 {
    compensated_sum(pairs.into_iter().map(|(x, p)| x * p))
}

/// Raw moment of order `k`: Σ pᵢ·xᵢᵏ.
///
/// `moment(pairs, 0)` is the total probability and `moment(pairs, 1)`
/// the expected value.
pub fn moment<I: IntoIterator<Item = (f64, f64)>>(pairs: I, k: u32) -> f64 {
    compensated_sum(pairs.into_iter().map(|(x, p)| p * powu(x, k)))
}

/// Central moment of order `k` around `center`: Σ pᵢ·(xᵢ − center)ᵏ.
pub fn central_moment<I: IntoIterator<Item = (f64, f64)>>(pairs: I, center: f64, k: u32) -> f64 {
    compensated_sum(pairs.into_iter().map(|(x, p)| p * powu(x - center, k)))
}

/// Population variance Σ pᵢ·(xᵢ − μ)².
///
/// Two passes: one for the mean, one for the squared deviations.
///
/// # Examples
/// ```
/// use u_probability::stats::variance;
/// let pairs = [(0.0, 0.5), (10.0, 0.5)];
/// assert!((variance(pairs) - 25.0).abs() < 1e-12);
/// ```
pub fn variance<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
    I::IntoIter: Clone,
{
    let iter = pairs.into_iter();
    let mean = expected_value(iter.clone());
    central_moment(iter, mean, 2)
}

/// Square root of a variance, clamping round-off negatives to zero.
///
/// # Errors
/// Returns [`DistributionError::NegativeVariance`] when `variance` is
/// below `-VARIANCE_TOLERANCE` or NaN.
pub fn std_dev_from_variance(variance: f64) -> Result<f64> {
    if variance >= 0.0 {
        Ok(variance.sqrt())
    } else if variance >= -VARIANCE_TOLERANCE {
        Ok(0.0)
    } else {
        Err(DistributionError::NegativeVariance(variance))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Normalized (value, probability) pairs.
    fn normalized_pairs() -> impl Strategy<Value = Vec<(f64, f64)>> {
        proptest::collection::vec((-1e3_f64..1e3, 0.0_f64..10.0), 1..50)
            .prop_filter("positive total", |v| v.iter().map(|&(_, w)| w).sum::<f64>() > 1e-6)
            .prop_map(|v| {
                let total: f64 = v.iter().map(|&(_, w)| w).sum();
                v.into_iter().map(|(x, w)| (x, w / total)).collect()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn variance_non_negative(pairs in normalized_pairs()) {
            let var = variance(pairs.iter().copied());
            prop_assert!(var >= -VARIANCE_TOLERANCE, "variance must be >= 0, got {}", var);
        }

        #[test]
        fn mean_within_value_range(pairs in normalized_pairs()) {
            let lo = pairs.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
            let hi = pairs.iter().map(|&(x, _)| x).fold(f64::NEG_INFINITY, f64::max);
            let mean = expected_value(pairs.iter().copied());
            prop_assert!(mean >= lo - 1e-9 && mean <= hi + 1e-9);
        }

        #[test]
        fn variance_matches_raw_moments(pairs in normalized_pairs()) {
            // Var = E[X²] − E[X]²
            let m1 = moment(pairs.iter().copied(), 1);
            let m2 = moment(pairs.iter().copied(), 2);
            let var = variance(pairs.iter().copied());
            let tol = 1e-8 * m2.abs().max(1.0);
            prop_assert!((var - (m2 - m1 * m1)).abs() < tol);
        }

        #[test]
        fn variance_shift_invariant(pairs in normalized_pairs(), shift in -100.0_f64..100.0) {
            let base = variance(pairs.iter().copied());
            let shifted = variance(pairs.iter().map(|&(x, p)| (x + shift, p)));
            prop_assert!((base - shifted).abs() < 1e-6 * base.max(1.0));
        }
    }
}
