//! The [`Distribution`] aggregate.
//!
//! A distribution owns one normalized [`ProbabilityTable`] and the
//! [`CumulativeTable`] derived from it. Both are built once by a
//! constructor and never mutated, so a `Distribution` can be shared
//! across threads; only the random source used for sampling is mutable.
//!
//! Construction flows through one path:
//!
//! ```text
//! density + support ──Discretizer──┐
//!                                  ├──> ProbabilityTable ──CumulativeTable::build──> Distribution
//! explicit (value, mass) pairs ────┘
//! ```

use std::fmt;

use rand::Rng;

use crate::cdf::CumulativeTable;
use crate::discretize::{Discretizer, Support};
use crate::error::{DistributionError, Result};
use crate::random::RandomSource;
use crate::stats;
use crate::table::ProbabilityTable;
use crate::value::Value;

/// How a distribution's table was produced.
///
/// Only rendering granularity depends on this; sampling and statistics
/// treat both kinds identically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Provenance {
    /// Built from an explicit mass table.
    Discrete,
    /// Discretized from a density over `support`.
    Continuous { support: Support, points: usize },
}

/// An immutable probability distribution over a finite set of outcomes.
///
/// # Examples
/// ```
/// use u_probability::{Distribution, ProbabilityTable, random::ReplaySource};
///
/// let table = ProbabilityTable::from_pairs([(0.0, 0.5), (10.0, 0.5)]);
/// let dist = Distribution::from_discrete(table).unwrap();
/// assert_eq!(dist.expected_value().unwrap(), 5.0);
/// assert_eq!(dist.variance().unwrap(), 25.0);
///
/// let mut source = ReplaySource::new(vec![0.0, 0.75]).unwrap();
/// assert_eq!(dist.sample(&mut source).as_number(), Some(0.0));
/// assert_eq!(dist.sample(&mut source).as_number(), Some(10.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    table: ProbabilityTable,
    cdf: CumulativeTable,
    provenance: Provenance,
    numeric: bool,
}

impl Distribution {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Builds a distribution from an explicit mass table.
    ///
    /// Masses need not sum to one; they are normalized here.
    ///
    /// # Errors
    /// - [`DistributionError::NegativeMass`] for a negative or non-finite
    ///   mass.
    /// - [`DistributionError::DegenerateDistribution`] if the masses sum to
    ///   zero, including an empty table.
    pub fn from_discrete(table: ProbabilityTable) -> Result<Self> {
        Self::build(table, Provenance::Discrete)
    }

    /// Builds a distribution by discretizing `density` over `support`
    /// with `points` grid cells.
    ///
    /// # Errors
    /// - [`DistributionError::InvalidSupport`] if `support` is empty,
    ///   inverted or non-finite, or `points == 0`.
    /// - [`DistributionError::NegativeMass`] if the density is negative or
    ///   not finite at a grid point.
    /// - [`DistributionError::DegenerateDistribution`] if the density is
    ///   zero at every grid point.
    ///
    /// # Examples
    /// ```
    /// use u_probability::{Distribution, DistributionError};
    ///
    /// let tri = Distribution::from_continuous(|x| 2.0 * x, (0.0, 1.0), 1000).unwrap();
    /// assert!((tri.expected_value().unwrap() - 2.0 / 3.0).abs() < 1e-3);
    ///
    /// let err = Distribution::from_continuous(|_| 1.0, (0.0, 0.0), 10).unwrap_err();
    /// assert!(matches!(err, DistributionError::InvalidSupport(_)));
    /// ```
    pub fn from_continuous<F>(density: F, support: (f64, f64), points: usize) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        let support = Support::try_from(support)?;
        let grid = Discretizer::new(points)?;
        Self::from_density(density, support, grid)
    }

    /// Like [`from_continuous`](Self::from_continuous), with an already
    /// validated support and grid.
    pub fn from_density<F>(density: F, support: Support, grid: Discretizer) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        let table = grid.discretize(density, &support);
        Self::build(
            table,
            Provenance::Continuous {
                support,
                points: grid.points(),
            },
        )
    }

    fn build(table: ProbabilityTable, provenance: Provenance) -> Result<Self> {
        let (table, cdf) = CumulativeTable::build(table)?;
        let numeric = table.is_numeric();
        debug!(
            "built {:?} distribution: {} entries, numeric={}",
            provenance,
            table.len(),
            numeric
        );
        Ok(Self {
            table,
            cdf,
            provenance,
            numeric,
        })
    }

    // ------------------------------------------------------------------
    // Read-only access
    // ------------------------------------------------------------------

    /// The normalized mass table.
    pub fn table(&self) -> &ProbabilityTable {
        &self.table
    }

    pub fn cdf(&self) -> &CumulativeTable {
        &self.cdf
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self.provenance, Provenance::Continuous { .. })
    }

    /// Support interval the density was discretized over, if any.
    pub fn support(&self) -> Option<Support> {
        match self.provenance {
            Provenance::Continuous { support, .. } => Some(support),
            Provenance::Discrete => None,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Normalized `(value, mass)` pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, f64)> + '_ {
        self.table.iter()
    }

    /// `(cumulative probability, value)` pairs in insertion order.
    pub fn cumulative(&self) -> impl ExactSizeIterator<Item = (f64, &Value)> + '_ {
        self.cdf.probabilities().iter().copied().zip(self.table.values())
    }

    /// Normalized mass of `value`, or `None` if it is not an outcome.
    ///
    /// Defined for categorical and numeric distributions alike.
    pub fn mass(&self, value: &Value) -> Option<f64> {
        self.table.mass(value)
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    // ------------------------------------------------------------------
    // Sampling
    // ------------------------------------------------------------------

    /// Draws one fraction from `source` and returns the selected position.
    pub fn sample_index<S: RandomSource + ?Sized>(&self, source: &mut S) -> usize {
        self.cdf.search(source.next_fraction())
    }

    /// Draws one outcome by inverse-CDF sampling.
    ///
    /// Consumes exactly one fraction from `source`. A fraction of `0.0`
    /// selects the first outcome with positive mass; a fraction just
    /// below 1 selects the last.
    pub fn sample<S: RandomSource + ?Sized>(&self, source: &mut S) -> &Value {
        let index = self.sample_index(source);
        self.value_at(index)
    }

    fn value_at(&self, index: usize) -> &Value {
        self.table.value(index)
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    fn numeric_pairs(&self) -> Result<impl Iterator<Item = (f64, f64)> + Clone + '_> {
        if !self.numeric {
            return Err(DistributionError::NotNumeric);
        }
        Ok(self
            .table
            .iter()
            .filter_map(|(v, m)| v.as_number().map(|x| (x, m))))
    }

    /// Expected value Σ pᵢ·xᵢ.
    ///
    /// # Errors
    /// [`DistributionError::NotNumeric`] if any outcome is a category.
    pub fn expected_value(&self) -> Result<f64> {
        Ok(stats::expected_value(self.numeric_pairs()?))
    }

    /// Population variance Σ pᵢ·(xᵢ − μ)².
    ///
    /// # Errors
    /// [`DistributionError::NotNumeric`] if any outcome is a category.
    pub fn variance(&self) -> Result<f64> {
        Ok(stats::variance(self.numeric_pairs()?))
    }

    /// Square root of [`variance`](Self::variance).
    ///
    /// Round-off negatives are clamped to zero.
    ///
    /// # Errors
    /// - [`DistributionError::NotNumeric`] if any outcome is a category.
    /// - [`DistributionError::NegativeVariance`] if the variance is
    ///   negative beyond round-off.
    pub fn std_dev(&self) -> Result<f64> {
        stats::std_dev_from_variance(self.variance()?)
    }

    /// Raw moment of order `k`: Σ pᵢ·xᵢᵏ.
    ///
    /// `moment(0)` is 1 and `moment(1)` equals the expected value.
    ///
    /// # Errors
    /// [`DistributionError::NotNumeric`] if any outcome is a category.
    pub fn moment(&self, k: u32) -> Result<f64> {
        Ok(stats::moment(self.numeric_pairs()?, k))
    }

    /// Central moment of order `k`: Σ pᵢ·(xᵢ − μ)ᵏ.
    ///
    /// # Errors
    /// [`DistributionError::NotNumeric`] if any outcome is a category.
    pub fn central_moment(&self, k: u32) -> Result<f64> {
        let pairs = self.numeric_pairs()?;
        let mean = stats::expected_value(pairs.clone());
        Ok(stats::central_moment(pairs, mean, k))
    }
}

impl rand::distr::Distribution<Value> for Distribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        self.value_at(self.sample_index(rng)).clone()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distribution({{")?;
        for (i, (value, mass)) in self.table.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}: {mass}")?;
        }
        write!(f, "}})")
    }
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::ReplaySource;
    use proptest::prelude::*;

    fn weighted_values() -> impl Strategy<Value = Vec<(f64, f64)>> {
        proptest::collection::vec((-100.0_f64..100.0, 0.0_f64..10.0), 1..40)
            .prop_filter("positive total", |v| v.iter().any(|&(_, w)| w > 1e-3))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn moment_one_equals_expected_value(pairs in weighted_values()) {
            let dist = Distribution::from_discrete(ProbabilityTable::from_pairs(pairs)).unwrap();
            let mean = dist.expected_value().unwrap();
            let m1 = dist.moment(1).unwrap();
            prop_assert!((mean - m1).abs() < 1e-12 * mean.abs().max(1.0));
        }

        #[test]
        fn normalized_masses_sum_to_one(pairs in weighted_values()) {
            let dist = Distribution::from_discrete(ProbabilityTable::from_pairs(pairs)).unwrap();
            prop_assert!((dist.table().total_mass() - 1.0).abs() < 1e-9);
            prop_assert!((dist.cdf().total() - 1.0).abs() < 1e-9);
        }

        #[test]
        fn sample_returns_positive_mass_value(pairs in weighted_values(), r in 0.0_f64..1.0) {
            let dist = Distribution::from_discrete(ProbabilityTable::from_pairs(pairs)).unwrap();
            let mut source = ReplaySource::constant(r).unwrap();
            let value = dist.sample(&mut source);
            prop_assert!(dist.mass(value).unwrap() > 0.0);
        }

        #[test]
        fn std_dev_squared_is_variance(pairs in weighted_values()) {
            let dist = Distribution::from_discrete(ProbabilityTable::from_pairs(pairs)).unwrap();
            let var = dist.variance().unwrap();
            let sd = dist.std_dev().unwrap();
            prop_assert!(sd >= 0.0);
            prop_assert!((sd * sd - var).abs() < 1e-9 * var.max(1.0));
        }
    }
}
