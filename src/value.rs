//! Outcome values: numeric scalars or opaque category labels.

use std::fmt;

/// A single outcome of a distribution.
///
/// Statistics are only defined when every outcome is a [`Value::Number`].
///
/// # Examples
/// ```
/// use u_probability::Value;
/// assert_eq!(Value::from(3).as_number(), Some(3.0));
/// assert_eq!(Value::from("heads").as_category(), Some("heads"));
/// assert_eq!(Value::from("heads").as_number(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Category(String),
}

impl Value {
    /// Returns the scalar, or `None` for a category label.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(x) => Some(*x),
            Value::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Category(label) => Some(label),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(x) => write!(f, "{x}"),
            Value::Category(label) => write!(f, "{label:?}"),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<u32> for Value {
    fn from(x: u32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Number(x as f64)
    }
}

impl From<u64> for Value {
    fn from(x: u64) -> Self {
        Value::Number(x as f64)
    }
}

impl From<usize> for Value {
    fn from(x: usize) -> Self {
        Value::Number(x as f64)
    }
}

impl From<&str> for Value {
    fn from(label: &str) -> Self {
        Value::Category(label.to_owned())
    }
}

impl From<String> for Value {
    fn from(label: String) -> Self {
        Value::Category(label)
    }
}
