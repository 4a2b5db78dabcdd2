//! Error taxonomy for distribution construction and queries.
//!
//! Every error is raised at the point of construction or query and
//! returned to the caller; there is no global error state and no
//! partial result.

/// Error type for distribution construction and statistics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistributionError {
    /// Support interval is empty, inverted or non-finite, or the grid
    /// has no points.
    #[error("invalid support: {0}")]
    InvalidSupport(String),

    /// Total probability mass is zero (or not finite); cannot normalize.
    #[error("degenerate distribution: total mass is {0}")]
    DegenerateDistribution(f64),

    /// A statistic was requested on a table holding category labels.
    #[error("statistic is not defined for categorical values")]
    NotNumeric,

    /// Variance came out negative beyond round-off tolerance.
    #[error("negative variance {0}")]
    NegativeVariance(f64),

    /// A mass is negative or not finite.
    #[error("invalid mass {mass} at position {index}")]
    NegativeMass { index: usize, mass: f64 },

    /// Parameters rejected by a named factory or a random source.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DistributionError>;
