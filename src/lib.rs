//! # u-probability
//!
//! Probability distributions over an explicit, finite table of outcomes.
//!
//! A [`Distribution`] is built either from a discrete mass table or from a
//! continuous density discretized onto a uniform grid. Construction
//! validates and normalizes the masses once and builds a cumulative table;
//! after that the distribution is immutable and supports inverse-CDF
//! sampling and moment statistics.
//!
//! ## Modules
//!
//! - [`table`] — insertion-ordered (value, mass) table
//! - [`discretize`] — left-rectangle discretization of a density
//! - [`cdf`] — normalization and cumulative table with ordered search
//! - [`random`] — the random-source capability consumed by sampling
//! - [`stats`] — compensated weighted sums and moments
//! - [`distribution`] — the [`Distribution`] aggregate
//! - [`named`] — normal, uniform and binomial factories
//!
//! ## Example
//! ```
//! use u_probability::{Distribution, random::create_rng};
//!
//! let dist = Distribution::binomial(10, 0.5).unwrap();
//! assert!((dist.expected_value().unwrap() - 5.0).abs() < 1e-9);
//!
//! let mut rng = create_rng(42);
//! let x = dist.sample(&mut rng).as_number().unwrap();
//! assert!((0.0..=10.0).contains(&x));
//! ```
//!
//! ## Features
//!
//! - `log` — emit construction diagnostics through the `log` facade.

#[cfg(feature = "log")]
#[macro_use]
extern crate log;
#[cfg(not(feature = "log"))]
macro_rules! trace { ($($x:tt)*) => () }
#[cfg(not(feature = "log"))]
macro_rules! debug { ($($x:tt)*) => () }

pub mod cdf;
pub mod discretize;
pub mod distribution;
pub mod error;
pub mod named;
pub mod random;
pub mod stats;
pub mod table;
pub mod value;

pub use cdf::CumulativeTable;
pub use discretize::{Discretizer, Support, DEFAULT_POINTS};
pub use distribution::{Distribution, Provenance};
pub use error::{DistributionError, Result};
pub use random::RandomSource;
pub use table::ProbabilityTable;
pub use value::Value;
