//! Flattened cell values.

use std::fmt;

use oilsheet_common::Value;

/// Text written for a set flag.
pub const FLAG_SET: &str = "Yes";

/// One cell of a flattened row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text value.
    Text(String),
    /// Integer value, written unchanged.
    Integer(i64),
    /// Floating point value.
    Number(f64),
    /// Flag, rendered as [`FLAG_SET`] or empty.
    Flag(bool),
    /// No value.
    Empty,
}

impl Cell {
    /// Convert a decoded JSON value.
    ///
    /// Nested arrays and objects are kept as their compact JSON text.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Flag(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Empty, Self::Number),
            },
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }

    /// Convert a decoded JSON value of a flag field.
    pub fn flag_from_value(value: &Value) -> Self {
        Self::Flag(Self::from_value(value).is_truthy())
    }

    /// Numeric view used by category predicates; text and empty cells are 0.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(i) => *i as f64,
            Self::Number(x) => *x,
            Self::Flag(b) => f64::from(u8::from(*b)),
            Self::Text(_) | Self::Empty => 0.0,
        }
    }

    /// Check if the cell holds a non-zero number, a set flag or non-empty text.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Empty => false,
            other => other.as_f64() != 0.0,
        }
    }

    /// Round floating point values to two decimals for display.
    pub fn rounded(&self) -> Self {
        match self {
            Self::Number(x) => Self::Number(round2(*x)),
            other => other.clone(),
        }
    }

    /// Check if the cell renders as nothing.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Empty | Self::Flag(false))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Number(x) => write!(f, "{}", x),
            Self::Flag(true) => write!(f, "{}", FLAG_SET),
            Self::Flag(false) | Self::Empty => Ok(()),
        }
    }
}

/// Round to two decimals through the decimal representation of the stored
/// value, so `2.675` (stored just below) becomes `2.67`.
fn round2(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    format!("{:.2}", x).parse().unwrap_or(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oilsheet_common::serde_json::json;

    #[test]
    fn test_from_value() {
        assert_eq!(Cell::from_value(&json!(3)), Cell::Integer(3));
        assert_eq!(Cell::from_value(&json!(-5.0)), Cell::Number(-5.0));
        assert_eq!(Cell::from_value(&json!("Fire Oil")), Cell::Text("Fire Oil".into()));
        assert_eq!(Cell::from_value(&json!(null)), Cell::Empty);
        assert_eq!(Cell::from_value(&json!(true)), Cell::Flag(true));
    }

    #[test]
    fn test_flags_render_yes_or_nothing() {
        for value in [json!(1), json!(true), json!(0.5)] {
            assert_eq!(Cell::flag_from_value(&value).to_string(), "Yes");
        }
        for value in [json!(0), json!(false), json!(null)] {
            assert_eq!(Cell::flag_from_value(&value).to_string(), "");
        }
    }

    #[test]
    fn test_rounding() {
        assert_eq!(Cell::Number(0.123456).rounded(), Cell::Number(0.12));
        assert_eq!(Cell::Number(1.0 / 3.0).rounded(), Cell::Number(0.33));
        assert_eq!(Cell::Number(-2.675).rounded(), Cell::Number(-2.67));
        assert_eq!(Cell::Integer(7).rounded(), Cell::Integer(7));
        assert_eq!(Cell::Text("x".into()).rounded(), Cell::Text("x".into()));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Cell::Integer(-4).as_f64(), -4.0);
        assert_eq!(Cell::Flag(true).as_f64(), 1.0);
        assert_eq!(Cell::Text("12".into()).as_f64(), 0.0);
        assert_eq!(Cell::Empty.as_f64(), 0.0);
    }
}
