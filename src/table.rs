//! Insertion-ordered probability mass tables.
//!
//! A [`ProbabilityTable`] is a sequence of `(value, mass)` pairs. It is
//! stored positionally rather than keyed by value: two grid points of a
//! discretized density may be numerically very close, and a float-keyed
//! map would silently merge them. A side index from value to position
//! keeps [`ProbabilityTable::insert`] and [`ProbabilityTable::mass`]
//! at O(1) expected time.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{DistributionError, Result};
use crate::stats::compensated_sum;
use crate::value::Value;

/// Hashable form of a [`Value`], equal exactly when the values compare
/// equal. NaN has no key since it is never equal to itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Key {
    Number(u64),
    Category(String),
}

impl Key {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Number(x) if x.is_nan() => None,
            // -0.0 == 0.0
            Value::Number(x) if *x == 0.0 => Some(Key::Number(0)),
            Value::Number(x) => Some(Key::Number(x.to_bits())),
            Value::Category(label) => Some(Key::Category(label.clone())),
        }
    }
}

/// Ordered mapping from outcome to (possibly unnormalized) mass.
///
/// Insertion order is preserved and determines the order of the
/// cumulative table built from it.
///
/// # Examples
/// ```
/// use u_probability::ProbabilityTable;
/// let table = ProbabilityTable::from_pairs([("A", 0.5), ("B", 0.3), ("C", 0.2)]);
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.mass(&"B".into()), Some(0.3));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbabilityTable {
    entries: Vec<(Value, f64)>,
    /// First position of each keyed value.
    index: HashMap<Key, usize>,
}

impl ProbabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Builds a table from `(value, mass)` pairs, with [`insert`](Self::insert)
    /// semantics for repeated values.
    ///
    /// # Complexity
    /// O(n) expected.
    pub fn from_pairs<V, I>(pairs: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = (V, f64)>,
    {
        pairs.into_iter().collect()
    }

    /// Sets the mass of `value`.
    ///
    /// A new value is appended at the end. A value already present keeps
    /// its position and has its mass replaced; the previous mass is
    /// returned. A NaN value never equals an existing one and is always
    /// appended.
    ///
    /// # Complexity
    /// O(1) expected.
    pub fn insert(&mut self, value: impl Into<Value>, mass: f64) -> Option<f64> {
        let value = value.into();
        let Some(key) = Key::of(&value) else {
            self.entries.push((value, mass));
            return None;
        };
        match self.index.entry(key) {
            Entry::Occupied(slot) => {
                Some(std::mem::replace(&mut self.entries[*slot.get()].1, mass))
            }
            Entry::Vacant(slot) => {
                slot.insert(self.entries.len());
                self.entries.push((value, mass));
                None
            }
        }
    }

    /// Appends a grid point without checking for an equal value.
    pub(crate) fn push_point(&mut self, x: f64, mass: f64) {
        let value = Value::Number(x);
        if let Some(key) = Key::of(&value) {
            self.index.entry(key).or_insert(self.entries.len());
        }
        self.entries.push((value, mass));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(value, mass)` pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, f64)> + Clone + '_ {
        self.entries.iter().map(|(v, m)| (v, *m))
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> + Clone + '_ {
        self.entries.iter().map(|(v, _)| v)
    }

    pub fn masses(&self) -> impl ExactSizeIterator<Item = f64> + Clone + '_ {
        self.entries.iter().map(|(_, m)| *m)
    }

    /// Returns the entry at position `index`.
    pub fn get(&self, index: usize) -> Option<(&Value, f64)> {
        self.entries.get(index).map(|(v, m)| (v, *m))
    }

    /// Value at `index`. Panics if `index` is out of bounds.
    pub(crate) fn value(&self, index: usize) -> &Value {
        &self.entries[index].0
    }

    /// Mass recorded for `value`, or `None` if it is not in the table.
    ///
    /// When grid points repeat a value, the first one is returned.
    pub fn mass(&self, value: &Value) -> Option<f64> {
        let position = *self.index.get(&Key::of(value)?)?;
        Some(self.entries[position].1)
    }

    /// Compensated sum of all masses.
    pub fn total_mass(&self) -> f64 {
        compensated_sum(self.masses())
    }

    /// True when every value is a number.
    pub fn is_numeric(&self) -> bool {
        self.entries.iter().all(|(v, _)| v.is_numeric())
    }

    /// Checks that every mass is finite and non-negative.
    ///
    /// # Errors
    /// Returns [`DistributionError::NegativeMass`] for the first offending
    /// entry.
    pub fn validate(&self) -> Result<()> {
        match self
            .entries
            .iter()
            .position(|&(_, m)| !m.is_finite() || m < 0.0)
        {
            Some(index) => Err(DistributionError::NegativeMass {
                index,
                mass: self.entries[index].1,
            }),
            None => Ok(()),
        }
    }

    /// Largest mass, or 0 for an empty table.
    pub(crate) fn max_mass(&self) -> f64 {
        self.masses().fold(0.0, f64::max)
    }

    /// Returns the table with every mass divided by `divisor`.
    pub(crate) fn divided_by(mut self, divisor: f64) -> Self {
        for (_, m) in &mut self.entries {
            *m /= divisor;
        }
        self
    }
}

impl<V: Into<Value>> FromIterator<(V, f64)> for ProbabilityTable {
    fn from_iter<I: IntoIterator<Item = (V, f64)>>(iter: I) -> Self {
        let mut table = ProbabilityTable::new();
        for (value, mass) in iter {
            table.insert(value, mass);
        }
        table
    }
}

impl<V: Into<Value>> Extend<(V, f64)> for ProbabilityTable {
    fn extend<I: IntoIterator<Item = (V, f64)>>(&mut self, iter: I) {
        for (value, mass) in iter {
            self.insert(value, mass);
        }
    }
}
