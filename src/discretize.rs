//! Discretization of continuous densities onto a uniform grid.
//!
//! # Algorithm
//! Left-rectangle quadrature: the support `[start, end)` is split into
//! `N` cells of width `h = (end − start)/N`, and cell `i` contributes the
//! point `xᵢ = start + i·h` with mass `f(xᵢ)·h`. The resulting table is
//! not normalized; that happens when the cumulative table is built.

use crate::error::{DistributionError, Result};
use crate::table::ProbabilityTable;

/// Default number of grid points.
pub const DEFAULT_POINTS: usize = 1000;

/// Closed-open support interval `[start, end)` of a continuous density.
///
/// # Examples
/// ```
/// use u_probability::Support;
/// let s = Support::new(-1.0, 3.0).unwrap();
/// assert_eq!(s.width(), 4.0);
/// assert!(Support::new(0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    start: f64,
    end: f64,
}

impl Support {
    /// Creates a support interval.
    ///
    /// # Errors
    /// Returns [`DistributionError::InvalidSupport`] if either bound is not
    /// finite or `end <= start`.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(DistributionError::InvalidSupport(format!(
                "support requires finite start < end, got [{start}, {end})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// True if `x` lies in `[start, end)`.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x < self.end
    }
}

impl TryFrom<(f64, f64)> for Support {
    type Error = DistributionError;

    fn try_from((start, end): (f64, f64)) -> Result<Self> {
        Support::new(start, end)
    }
}

/// Grid configuration for discretizing a density.
///
/// # Examples
/// ```
/// use u_probability::{Discretizer, Support};
/// let grid = Discretizer::new(4).unwrap();
/// let table = grid.discretize(|_| 0.5, &Support::new(0.0, 2.0).unwrap());
/// assert_eq!(table.len(), 4);
/// assert!((table.total_mass() - 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discretizer {
    points: usize,
}

impl Discretizer {
    /// Creates a grid with `points` cells.
    ///
    /// # Errors
    /// Returns [`DistributionError::InvalidSupport`] if `points == 0`.
    pub fn new(points: usize) -> Result<Self> {
        if points == 0 {
            return Err(DistributionError::InvalidSupport(
                "discretization requires at least one point".into(),
            ));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> usize {
        self.points
    }

    /// Cell width `(end − start)/N` for `support`.
    pub fn step(&self, support: &Support) -> f64 {
        support.width() / self.points as f64
    }

    /// Evaluates `density` at the left edge of every cell and records
    /// `f(xᵢ)·h` as that point's mass.
    ///
    /// Produces exactly `points` entries in increasing order of `xᵢ`.
    /// Masses are not validated here.
    ///
    /// # Complexity
    /// Time: O(N) density evaluations, Space: O(N)
    pub fn discretize<F>(&self, density: F, support: &Support) -> ProbabilityTable
    where
        F: Fn(f64) -> f64,
    {
        let step = self.step(support);
        trace!(
            "discretizing [{}, {}) into {} cells of width {}",
            support.start(),
            support.end(),
            self.points,
            step
        );
        let mut table = ProbabilityTable::with_capacity(self.points);
        for i in 0..self.points {
            let x = support.start() + i as f64 * step;
            table.push_point(x, density(x) * step);
        }
        table
    }
}

impl Default for Discretizer {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
        }
    }
}
