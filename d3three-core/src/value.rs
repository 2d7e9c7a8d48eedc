//! Scalar values carried by chart data

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field of a datum: numeric for continuous axes, text for
/// categorical ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Finite numeric view of the value. Text that parses as a number is
    /// coerced; `NaN` and infinities, as numbers or text, are not numeric.
    pub fn as_f64(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        n.is_finite().then_some(n)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Number(_) => None,
        }
    }
}

/// Integral numbers print without a fractional part, the way chart labels
/// are expected to read (`1`, not `1.0`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_integral_numbers() {
        assert_eq!(Value::from(1.0).to_string(), "1");
        assert_eq!(Value::from(-20.0).to_string(), "-20");
        assert_eq!(Value::from(0.25).to_string(), "0.25");
        assert_eq!(Value::from("apples").to_string(), "apples");
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::from("3.5").as_f64(), Some(3.5));
        assert_eq!(Value::from("three").as_f64(), None);
        assert_eq!(Value::from(2).as_f64(), Some(2.0));
        assert_eq!(Value::from("NaN").as_f64(), None);
        assert_eq!(Value::from("-inf").as_f64(), None);
        assert_eq!(Value::from(f64::INFINITY).as_f64(), None);
    }

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<Value> = serde_json::from_str(r#"[1, 2.5, "a"]"#).unwrap();
        assert_eq!(values, vec![Value::from(1.0), Value::from(2.5), Value::from("a")]);
    }
}
