//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic field value used for sorting, filtering and default cell text.
///
/// Rows expose their fields through [`GridRow::value`](super::GridRow::value),
/// which lets the grid stay generic over the record type.
///
/// # Ordering
///
/// [`Value::sort_cmp`] defines the order the sort engine uses:
///
/// - `Null` behaves like empty text.
/// - Text compares case-insensitively.
/// - Numbers, booleans and timestamps compare natively; `Int` and `Float`
///   are compared as numbers.
/// - Values of different kinds fall back to a fixed kind order
///   (text, bool, number, datetime) so the order stays total.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use console_lib::model::Value;
///
/// let a = Value::from("apple");
/// let b = Value::from("Banana");
/// assert_eq!(a.sort_cmp(&b), Ordering::Less);
/// assert_eq!(Value::Null.sort_cmp(&Value::from("")), Ordering::Equal);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Date and time.
    DateTime(DateTime<Utc>),
    /// String value.
    Text(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::DateTime(_) => "datetime",
            Value::Text(_) => "text",
        }
    }

    /// Returns the text content, treating null as empty text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Null => Some(""),
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null | Value::Text(_) => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::DateTime(_) => 3,
        }
    }

    /// Compares two values in sort order.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            _ => {
                if let (Some(a), Some(b)) = (self.as_text(), other.as_text()) {
                    return cmp_ignore_case(a, b);
                }
                if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
                    return a.total_cmp(&b);
                }
                self.kind_rank().cmp(&other.kind_rank())
            }
        }
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(true) => f.write_str("Yes"),
            Value::Bool(false) => f.write_str("No"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M")),
            Value::Text(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_case_insensitive() {
        assert_eq!(
            Value::from("apple").sort_cmp(&Value::from("Banana")),
            Ordering::Less
        );
        assert_eq!(
            Value::from("ALPHA").sort_cmp(&Value::from("alpha")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_null_sorts_as_empty_text() {
        assert_eq!(Value::Null.sort_cmp(&Value::from("")), Ordering::Equal);
        assert_eq!(Value::Null.sort_cmp(&Value::from("a")), Ordering::Less);
    }

    #[test]
    fn test_numbers_compare_natively() {
        assert_eq!(Value::from(9).sort_cmp(&Value::from(10)), Ordering::Less);
        assert_eq!(Value::from(2.5).sort_cmp(&Value::from(2)), Ordering::Greater);
    }

    #[test]
    fn test_mixed_kinds_use_kind_order() {
        assert_eq!(Value::from("zzz").sort_cmp(&Value::from(1)), Ordering::Less);
        assert_eq!(Value::from(true).sort_cmp(&Value::from(0)), Ordering::Less);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(true).to_string(), "Yes");
        assert_eq!(Value::from(Some("x")).to_string(), "x");
        assert_eq!(Value::from(None::<String>).to_string(), "");
    }
}
