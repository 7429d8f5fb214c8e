//! Log record fields
//!
//! A field is a typed key/value pair attached to a record. Values keep
//! their type through to the JSON output (`count=3` serializes as a number,
//! not a string).

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// Typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// String value
    Str(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point
    Float(f64),
    /// Boolean
    Bool(bool),
}

impl FieldValue {
    /// Convert to a JSON value
    pub(crate) fn to_json(&self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.clone()),
            Self::Int(i) => Value::from(*i),
            Self::UInt(u) => Value::from(*u),
            Self::Float(f) => Value::from(*f),
            Self::Bool(b) => Value::from(*b),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        Self::UInt(u64::from(u))
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        Self::UInt(u)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A key/value pair attached to a log record
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field key
    pub key: Cow<'static, str>,

    /// Field value
    pub value: FieldValue,
}

impl Field {
    /// Create a field
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Shorthand for [`Field::new`]
pub fn field(key: impl Into<Cow<'static, str>>, value: impl Into<FieldValue>) -> Field {
    Field::new(key, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_conversions() {
        assert_eq!(FieldValue::from("s"), FieldValue::Str("s".to_string()));
        assert_eq!(FieldValue::from(3_i64), FieldValue::Int(3));
        assert_eq!(FieldValue::from(3_u64), FieldValue::UInt(3));
        assert_eq!(FieldValue::from(1.5_f64), FieldValue::Float(1.5));
        assert_eq!(FieldValue::from(true), FieldValue::Bool(true));
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::from("abc").to_string(), "abc");
        assert_eq!(FieldValue::from(42_i64).to_string(), "42");
        assert_eq!(FieldValue::from(false).to_string(), "false");
    }

    #[test]
    fn test_field_value_json_preserves_types() {
        assert!(FieldValue::from(3_i64).to_json().is_i64());
        assert!(FieldValue::from(3_u64).to_json().is_u64());
        assert!(FieldValue::from(1.5_f64).to_json().is_f64());
        assert!(FieldValue::from(true).to_json().is_boolean());
        assert!(FieldValue::from("s").to_json().is_string());
    }

    #[test]
    fn test_field_shorthand() {
        let f = field("user", "alice");
        assert_eq!(f.key, "user");
        assert_eq!(f.value, FieldValue::Str("alice".to_string()));
    }
}
