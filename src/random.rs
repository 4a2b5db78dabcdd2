//! Random sources consumed by sampling.
//!
//! Sampling needs exactly one capability: a uniform fraction in `[0, 1)`
//! per draw. [`RandomSource`] names that capability. Every [`rand::Rng`]
//! provides it, and [`ReplaySource`] replays fixed fractions for
//! deterministic tests.
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.
//!
//! # Threads
//!
//! A [`Distribution`](crate::Distribution) can be shared freely; the
//! source cannot, since each draw mutates it. Give each thread its own
//! source.

use rand::distr::{Distribution as _, StandardUniform};
use rand::Rng;

use crate::error::{DistributionError, Result};

/// Producer of uniform fractions in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next fraction, uniformly distributed in `[0, 1)`.
    fn next_fraction(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_fraction(&mut self) -> f64 {
        StandardUniform.sample(self)
    }
}

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
/// The sequence is deterministic for a given seed on the same platform.
///
/// # Examples
/// ```
/// use u_probability::random::{create_rng, RandomSource};
/// let mut rng = create_rng(42);
/// let x = rng.next_fraction();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Deterministic source cycling through a fixed list of fractions.
///
/// # Examples
/// ```
/// use u_probability::random::{RandomSource, ReplaySource};
/// let mut source = ReplaySource::new(vec![0.0, 0.5]).unwrap();
/// assert_eq!(source.next_fraction(), 0.0);
/// assert_eq!(source.next_fraction(), 0.5);
/// assert_eq!(source.next_fraction(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySource {
    fractions: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    /// Creates a source replaying `fractions` in order, wrapping around.
    ///
    /// # Errors
    /// Returns [`DistributionError::InvalidParameters`] if `fractions` is
    /// empty or any fraction lies outside `[0, 1)`.
    pub fn new(fractions: impl Into<Vec<f64>>) -> Result<Self> {
        let fractions = fractions.into();
        if fractions.is_empty() {
            return Err(DistributionError::InvalidParameters(
                "replay source needs at least one fraction".into(),
            ));
        }
        if let Some(bad) = fractions.iter().find(|r| !(0.0..1.0).contains(*r)) {
            return Err(DistributionError::InvalidParameters(format!(
                "replay fraction {bad} is outside [0, 1)"
            )));
        }
        Ok(Self {
            fractions,
            cursor: 0,
        })
    }

    /// A source that always returns `fraction`.
    pub fn constant(fraction: f64) -> Result<Self> {
        Self::new(vec![fraction])
    }
}

impl RandomSource for ReplaySource {
    fn next_fraction(&mut self) -> f64 {
        let r = self.fractions[self.cursor];
        self.cursor = (self.cursor + 1) % self.fractions.len();
        r
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let vals1: Vec<f64> = (0..10).map(|_| rng1.next_fraction()).collect();
        let vals2: Vec<f64> = (0..10).map(|_| rng2.next_fraction()).collect();
        assert_eq!(vals1, vals2);
    }

    #[test]
    fn test_rng_fractions_in_unit_interval() {
        let mut rng = create_rng(7);
        for _ in 0..10_000 {
            let r = rng.next_fraction();
            assert!((0.0..1.0).contains(&r), "fraction {r} outside [0, 1)");
        }
    }

    #[test]
    fn test_rng_through_trait_object() {
        let mut rng = create_rng(1);
        let source: &mut dyn RandomSource = &mut rng;
        let r = source.next_fraction();
        assert!((0.0..1.0).contains(&r));
    }

    #[test]
    fn test_replay_cycles() {
        let mut source = ReplaySource::new([0.1, 0.2, 0.3]).unwrap();
        let drawn: Vec<f64> = (0..5).map(|_| source.next_fraction()).collect();
        assert_eq!(drawn, vec![0.1, 0.2, 0.3, 0.1, 0.2]);
    }

    #[test]
    fn test_replay_constant() {
        let mut source = ReplaySource::constant(0.75).unwrap();
        assert_eq!(source.next_fraction(), 0.75);
        assert_eq!(source.next_fraction(), 0.75);
    }

    #[test]
    fn test_replay_rejects_out_of_range() {
        assert!(ReplaySource::new(Vec::<f64>::new()).is_err());
        assert!(ReplaySource::constant(1.0).is_err());
        assert!(ReplaySource::constant(-0.1).is_err());
        assert!(ReplaySource::constant(f64::NAN).is_err());
        assert!(ReplaySource::constant(1.0 - f64::EPSILON).is_ok());
    }
}
