//! Normalization and the cumulative table used for inverse-CDF sampling.
//!
//! # Algorithm
//! Masses are validated, divided by their compensated total, and then
//! accumulated in insertion order. When that total overflows or is
//! subnormal, every mass is first divided by the largest one, which
//! brings the total into `[1, n]`. Sampling a fraction `r ∈ [0, 1)`
//! selects the first entry whose cumulative probability exceeds `r`,
//! found by binary search over the non-decreasing cumulative sequence.
//! Entry `i` therefore owns the half-open interval `[cᵢ₋₁, cᵢ)`, whose
//! width is its normalized mass.
//!
//! # Complexity
//! - Construction: O(n)
//! - Search: O(log n)

use crate::error::{DistributionError, Result};
use crate::stats::CompensatedSum;
use crate::table::ProbabilityTable;

/// Totals within this distance of 1 are not rescaled.
pub const NORMALIZATION_EPSILON: f64 = 1e-12;

/// Maximum distance of the final cumulative probability from 1.
pub const CDF_TOLERANCE: f64 = 1e-9;

/// Running cumulative probabilities of a normalized table.
///
/// Built once, immutable afterwards. Positions match the
/// [`ProbabilityTable`] it was built from.
///
/// # Examples
/// ```
/// use u_probability::{CumulativeTable, ProbabilityTable};
/// let table = ProbabilityTable::from_pairs([("A", 2.0), ("B", 6.0)]);
/// let (normalized, cdf) = CumulativeTable::build(table).unwrap();
/// assert_eq!(normalized.mass(&"A".into()), Some(0.25));
/// assert_eq!(cdf.search(0.1), 0);
/// assert_eq!(cdf.search(0.5), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeTable {
    cumulative: Vec<f64>,
    last_positive: usize,
}

impl CumulativeTable {
    /// Normalizes `table` and builds its cumulative table.
    ///
    /// Returns the normalized table together with the cumulative
    /// probabilities, in the same order.
    ///
    /// # Errors
    /// - [`DistributionError::NegativeMass`] if a mass is negative or not
    ///   finite.
    /// - [`DistributionError::DegenerateDistribution`] if every mass is
    ///   zero (this includes an empty table).
    pub fn build(table: ProbabilityTable) -> Result<(ProbabilityTable, Self)> {
        table.validate()?;

        let peak = table.max_mass();
        if peak == 0.0 {
            return Err(DistributionError::DegenerateDistribution(0.0));
        }

        let total = table.total_mass();
        debug!("normalizing {} entries with total mass {}", table.len(), total);
        let table = if !total.is_finite() || total < f64::MIN_POSITIVE {
            trace!("total mass {} out of normal range, dividing by peak {}", total, peak);
            let table = table.divided_by(peak);
            let total = table.total_mass();
            table.divided_by(total)
        } else if (total - 1.0).abs() <= NORMALIZATION_EPSILON {
            trace!("total mass {} within epsilon of 1, skipping rescale", total);
            table
        } else {
            table.divided_by(total)
        };

        let mut cumulative = Vec::with_capacity(table.len());
        let mut acc = CompensatedSum::new();
        let mut last_positive = 0;
        let mut prev = 0.0_f64;
        for (i, mass) in table.masses().enumerate() {
            acc.add(mass);
            if mass > 0.0 {
                last_positive = i;
            }
            // Compensation can wobble by an ulp; keep the sequence monotone.
            prev = acc.value().max(prev);
            cumulative.push(prev);
        }

        debug_assert!(
            (prev - 1.0).abs() <= CDF_TOLERANCE,
            "final cumulative probability {prev} is not 1"
        );

        Ok((
            table,
            Self {
                cumulative,
                last_positive,
            },
        ))
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Cumulative probabilities in table order.
    pub fn probabilities(&self) -> &[f64] {
        &self.cumulative
    }

    /// Final cumulative probability (1 within [`CDF_TOLERANCE`]).
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Position selected by the fraction `r ∈ [0, 1)`.
    ///
    /// Returns the smallest index whose cumulative probability is greater
    /// than `r`, so zero-mass entries are never selected. If round-off
    /// left every cumulative probability at or below `r`, the last entry
    /// with positive mass is returned.
    pub fn search(&self, r: f64) -> usize {
        let i = self.cumulative.partition_point(|&c| c <= r);
        if i < self.cumulative.len() {
            i
        } else {
            self.last_positive
        }
    }
}
