//! Named distribution factories.
//!
//! Density and mass evaluation is delegated to [`statrs`]; this module
//! only chooses the support and grid and routes the result through the
//! normal construction path.
//!
//! | Factory | Table | Support |
//! |---|---|---|
//! | [`Distribution::normal`] | discretized Gaussian pdf | μ ± 4σ |
//! | [`Distribution::uniform`] | discretized constant pdf | `[start, end)` |
//! | [`Distribution::binomial`] | exact pmf for k = 0..=n | — |
//!
//! The normal factory truncates at four standard deviations, dropping
//! roughly 6.3 × 10⁻⁵ of the mass before renormalization.

use statrs::distribution::{Binomial, Continuous, Discrete, Normal, Uniform};

use crate::discretize::{Discretizer, Support, DEFAULT_POINTS};
use crate::distribution::Distribution;
use crate::error::{DistributionError, Result};
use crate::table::ProbabilityTable;

/// Half-width of the normal support, in standard deviations.
pub const NORMAL_TRUNCATION_SIGMAS: f64 = 4.0;

fn invalid(err: impl std::fmt::Display) -> DistributionError {
    DistributionError::InvalidParameters(err.to_string())
}

impl Distribution {
    /// Normal distribution N(mean, std_dev²) discretized on `points` cells
    /// over `[mean − 4σ, mean + 4σ)`.
    ///
    /// # Errors
    /// - [`DistributionError::InvalidParameters`] if `std_dev <= 0` or a
    ///   parameter is NaN.
    /// - [`DistributionError::InvalidSupport`] if the truncated support is
    ///   not finite or `points == 0`.
    ///
    /// # Examples
    /// ```
    /// use u_probability::Distribution;
    /// let n = Distribution::normal(10.0, 2.0, 1000).unwrap();
    /// assert!((n.expected_value().unwrap() - 10.0).abs() < 0.01);
    /// assert!((n.std_dev().unwrap() - 2.0).abs() < 0.01);
    /// ```
    pub fn normal(mean: f64, std_dev: f64, points: usize) -> Result<Self> {
        let gaussian = Normal::new(mean, std_dev).map_err(invalid)?;
        let half_width = NORMAL_TRUNCATION_SIGMAS * std_dev;
        let support = Support::new(mean - half_width, mean + half_width)?;
        let grid = Discretizer::new(points)?;
        Self::from_density(|x| gaussian.pdf(x), support, grid)
    }

    /// N(0, 1) on the default grid.
    pub fn standard_normal() -> Result<Self> {
        Self::normal(0.0, 1.0, DEFAULT_POINTS)
    }

    /// Continuous uniform distribution on `[start, end)` discretized on
    /// `points` cells.
    ///
    /// # Errors
    /// - [`DistributionError::InvalidSupport`] if `end <= start`, a bound
    ///   is not finite, or `points == 0`.
    ///
    /// # Examples
    /// ```
    /// use u_probability::Distribution;
    /// let u = Distribution::uniform(0.0, 10.0, 1000).unwrap();
    /// assert_eq!(u.len(), 1000);
    /// assert!((u.expected_value().unwrap() - 4.995).abs() < 1e-9);
    /// ```
    pub fn uniform(start: f64, end: f64, points: usize) -> Result<Self> {
        let support = Support::new(start, end)?;
        let grid = Discretizer::new(points)?;
        let flat = Uniform::new(start, end).map_err(invalid)?;
        Self::from_density(|x| flat.pdf(x), support, grid)
    }

    /// Uniform on `[0, 1)` on the default grid.
    pub fn standard_uniform() -> Result<Self> {
        Self::uniform(0.0, 1.0, DEFAULT_POINTS)
    }

    /// Binomial distribution with `n` trials and success probability `p`.
    ///
    /// The table holds the exact pmf `C(n,k)·pᵏ·(1−p)ⁿ⁻ᵏ` for
    /// `k = 0..=n`; no discretization is involved.
    ///
    /// # Errors
    /// [`DistributionError::InvalidParameters`] if `p` is outside `[0, 1]`
    /// or NaN.
    ///
    /// # Examples
    /// ```
    /// use u_probability::{Distribution, Value};
    /// let b = Distribution::binomial(2, 0.5).unwrap();
    /// assert!((b.mass(&Value::from(1)).unwrap() - 0.5).abs() < 1e-12);
    /// ```
    pub fn binomial(n: u64, p: f64) -> Result<Self> {
        let binomial = Binomial::new(p, n).map_err(invalid)?;
        let mut table = ProbabilityTable::new();
        for k in 0..=n {
            table.push_point(k as f64, binomial.pmf(k));
        }
        Self::from_discrete(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    // --- normal ---

    #[test]
    fn test_normal_support_and_size() {
        let n = Distribution::normal(1.0, 0.5, 200).unwrap();
        assert_eq!(n.len(), 200);
        let support = n.support().unwrap();
        assert_eq!(support.start(), -1.0);
        assert_eq!(support.end(), 3.0);
        assert!(n.is_continuous());
    }

    #[test]
    fn test_standard_normal_moments() {
        let n = Distribution::standard_normal().unwrap();
        assert_eq!(n.len(), DEFAULT_POINTS);
        // Only the truncated tails and the excluded right end perturb the mean.
        assert!(n.expected_value().unwrap().abs() < 1e-5);
        assert!((n.variance().unwrap() - 1.0).abs() < 2e-3);
        assert!(n.moment(3).unwrap().abs() < 0.05);
    }

    #[test]
    fn test_normal_symmetric_masses() {
        let n = Distribution::normal(0.0, 1.0, 100).unwrap();
        let masses: Vec<f64> = n.table().masses().collect();
        // x_i and x_{100-i} mirror around 0.
        for i in 1..50 {
            assert!((masses[i] - masses[100 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_normal_invalid() {
        assert!(matches!(
            Distribution::normal(0.0, 0.0, 100),
            Err(DistributionError::InvalidParameters(_))
        ));
        assert!(matches!(
            Distribution::normal(0.0, -1.0, 100),
            Err(DistributionError::InvalidParameters(_))
        ));
        assert!(matches!(
            Distribution::normal(0.0, 1.0, 0),
            Err(DistributionError::InvalidSupport(_))
        ));
    }

    // --- uniform ---

    #[test]
    fn test_uniform_masses_equal() {
        let u = Distribution::uniform(2.0, 4.0, 50).unwrap();
        for (_, mass) in u.iter() {
            assert!((mass - 0.02).abs() < 1e-12);
        }
        assert_eq!(u.support(), Some(Support::new(2.0, 4.0).unwrap()));
    }

    #[test]
    fn test_standard_uniform() {
        let u = Distribution::standard_uniform().unwrap();
        assert_eq!(u.len(), DEFAULT_POINTS);
        // Grid mean of {0, h, …, 1−h}
        assert!((u.expected_value().unwrap() - 0.4995).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_invalid_support() {
        assert!(matches!(
            Distribution::uniform(1.0, 1.0, 10),
            Err(DistributionError::InvalidSupport(_))
        ));
        assert!(matches!(
            Distribution::uniform(3.0, 1.0, 10),
            Err(DistributionError::InvalidSupport(_))
        ));
    }

    // --- binomial ---

    #[test]
    fn test_binomial_two_half() {
        let b = Distribution::binomial(2, 0.5).unwrap();
        let expected = [(0.0, 0.25), (1.0, 0.5), (2.0, 0.25)];
        assert_eq!(b.len(), 3);
        for ((value, mass), (x, p)) in b.iter().zip(expected) {
            assert_eq!(value, &Value::from(x));
            assert!((mass - p).abs() < 1e-12, "mass at {x}: {mass} vs {p}");
        }
        assert!(!b.is_continuous());
    }

    #[test]
    fn test_binomial_moments() {
        let b = Distribution::binomial(10, 0.3).unwrap();
        assert!((b.expected_value().unwrap() - 3.0).abs() < 1e-10);
        assert!((b.variance().unwrap() - 2.1).abs() < 1e-10);
    }

    #[test]
    fn test_binomial_degenerate_p() {
        let b = Distribution::binomial(5, 1.0).unwrap();
        assert!((b.expected_value().unwrap() - 5.0).abs() < 1e-12);
        assert!(b.std_dev().unwrap() < 1e-6);
    }

    #[test]
    fn test_binomial_invalid() {
        assert!(matches!(
            Distribution::binomial(5, 1.5),
            Err(DistributionError::InvalidParameters(_))
        ));
        assert!(Distribution::binomial(5, f64::NAN).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn binomial_mean_is_np(n in 1_u64..60, p in 0.01_f64..0.99) {
            let b = Distribution::binomial(n, p).unwrap();
            let expected = n as f64 * p;
            prop_assert!((b.expected_value().unwrap() - expected).abs() < 1e-9 * expected.max(1.0));
        }

        #[test]
        fn normal_mean_near_mu(mu in -100.0_f64..100.0, sigma in 0.1_f64..10.0) {
            let d = Distribution::normal(mu, sigma, 1000).unwrap();
            let err = (d.expected_value().unwrap() - mu).abs();
            prop_assert!(err < 1e-5 * sigma + 1e-9 * mu.abs(), "mean error {err}");
        }

        #[test]
        fn uniform_cdf_ends_at_one(start in -100.0_f64..100.0, width in 0.1_f64..100.0) {
            let u = Distribution::uniform(start, start + width, 500).unwrap();
            prop_assert!((u.cdf().total() - 1.0).abs() < 1e-9);
        }
    }
}
