//! Cell values for seller tables and transformed rows

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value.
///
/// Seller tables carry text, numbers, booleans or missing cells. Transformed
/// rows may additionally carry lists of strings (image URLs, bullet points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Missing value
    #[default]
    Null,

    /// Boolean value
    Boolean(bool),

    /// Integer value
    Integer(i64),

    /// Floating-point value
    Float(f64),

    /// String value
    String(String),

    /// List of strings
    List(Vec<String>),
}

impl Value {
    /// Build a string value
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// Build a list value from anything that yields strings
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Null or the empty string
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Truthiness as a seller would read it: non-empty text, non-zero numbers,
    /// `true`, non-empty lists.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
        }
    }

    /// Borrow the inner string, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the inner list, if this is a list value
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Coerce to text. Null becomes the empty string and lists are
    /// comma-joined.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.clone(),
            Value::List(items) => items.join(","),
        }
    }

    /// Numeric interpretation of the value.
    ///
    /// Strings are trimmed before parsing. Lists and null are never numbers.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Null | Value::List(_) => None,
        }
    }

    /// Integer interpretation of the value.
    ///
    /// Floats are truncated toward zero; strings must hold a base-10 integer.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) => float_to_integer(f.trunc()),
            Value::Boolean(b) => Some(i64::from(*b)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            Value::Null | Value::List(_) => None,
        }
    }

    /// Name of the variant, for log fields and messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Render a float the way it reads in seller-facing messages: integral values
/// keep a trailing `.0`, everything else uses the shortest round-trip form.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Convert an integral float to `i64`, if it is integral and in range.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn float_to_integer(value: f64) -> Option<i64> {
    if value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value < i64::MAX as f64
    {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::Integer(10).to_text(), "10");
        assert_eq!(Value::Float(100.5).to_text(), "100.5");
        assert_eq!(Value::Float(150.0).to_text(), "150.0");
        assert_eq!(Value::Boolean(true).to_text(), "true");
        assert_eq!(Value::list(["a.jpg", "b.jpg"]).to_text(), "a.jpg,b.jpg");
    }

    #[test]
    fn test_blank_and_truthy() {
        assert!(Value::Null.is_blank());
        assert!(Value::string("").is_blank());
        assert!(!Value::string(" ").is_blank());
        assert!(!Value::List(Vec::new()).is_blank());

        assert!(!Value::List(Vec::new()).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(Value::string("x").is_truthy());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Value::string(" 12.5 ").to_number(), Some(12.5));
        assert_eq!(Value::Integer(3).to_number(), Some(3.0));
        assert_eq!(Value::Boolean(true).to_number(), Some(1.0));
        assert_eq!(Value::string("abc").to_number(), None);
        assert_eq!(Value::list(["1"]).to_number(), None);
        assert_eq!(Value::Null.to_number(), None);
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(Value::string("42").to_integer(), Some(42));
        assert_eq!(Value::string("4.2").to_integer(), None);
        assert_eq!(Value::Float(10.7).to_integer(), Some(10));
        assert_eq!(Value::Float(-10.7).to_integer(), Some(-10));
        assert_eq!(Value::Float(f64::NAN).to_integer(), None);
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(200.0), "200.0");
        assert_eq!(format_float(150.75), "150.75");
        assert_eq!(format_float(-0.5), "-0.5");
    }

    #[test]
    fn test_serde_shapes() {
        let values = vec![
            Value::Null,
            Value::Integer(10),
            Value::Float(100.5),
            Value::string("TEST"),
            Value::list(["a", "b"]),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,10,100.5,"TEST",["a","b"]]"#);

        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
