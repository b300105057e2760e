//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by a row field.
///
/// Rows are supplied by the host as loosely typed records, so fields carry a
/// small set of JSON-compatible variants rather than a fixed schema.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | boolean | `Bool` |
/// | integer number | `Int` |
/// | fractional number | `Float` |
/// | string | `String` |
/// | array | `List` |
/// | object | `Map` |
///
/// # Example
///
/// ```
/// use datatable_lib::model::Value;
///
/// let name = Value::from("Olivia Rhye");
/// let employees = Value::from(1_200i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// assert_eq!(empty.to_string(), "");
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
    /// String value.
    String(String),
    /// Ordered list of values (e.g. tags).
    List(Vec<Value>),
    /// Nested object. Stringifies as `[object Object]`.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for `Int` and `Float`.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Returns the numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Case-insensitive substring test against the stringified value.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn contains_folded(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.to_string().to_lowercase().contains(needle)
    }

    /// Case-insensitive equality against the stringified value.
    ///
    /// `token` must already be lowercased.
    pub(crate) fn equals_folded(&self, token: &str) -> bool {
        self.to_string().to_lowercase() == token
    }
}

/// Compares two values the way the sort stage orders a column.
///
/// Two numbers compare numerically; two non-numbers compare their
/// stringified forms lexicographically. Every number sorts before every
/// non-number, which keeps the order total on mixed columns.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Int(x), Value::Float(y)) => compare_int_float(*x, *y),
        (Value::Float(x), Value::Int(y)) => compare_int_float(*y, *x).reverse(),
        (Value::Float(x), Value::Float(y)) => compare_floats(*x, *y),
        (Value::Int(_) | Value::Float(_), _) => Ordering::Less,
        (_, Value::Int(_) | Value::Float(_)) => Ordering::Greater,
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// `-0.0` equals `0.0`; NaN sorts after every other number.
fn compare_floats(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float, without rounding the integer.
fn compare_int_float(x: i64, y: f64) -> Ordering {
    // 2^63 is exactly representable; every i64 lies in [-2^63, 2^63).
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if y.is_nan() || y >= BOUND {
        return Ordering::Less;
    }
    if y < -BOUND {
        return Ordering::Greater;
    }
    let whole = y.trunc();
    // In range, so the cast is exact.
    match x.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(y - whole)).unwrap_or(Ordering::Equal),
        other => other,
    }
}

/// The default stringifier used for search, filtering and display.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Map(_) => f.write_str("[object Object]"),
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

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify_matches_display_rules() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from(vec!["Design", "Product"]).to_string(), "Design,Product");
    }

    #[test]
    fn test_compare_numbers_numerically() {
        assert_eq!(compare_values(&Value::from(9), &Value::from(10)), Ordering::Less);
        assert_eq!(compare_values(&Value::from(9.5), &Value::from(10)), Ordering::Less);
        assert_eq!(compare_values(&Value::from(10), &Value::from(10.0)), Ordering::Equal);
    }

    #[test]
    fn test_compare_strings_lexicographically() {
        // "9" > "10" as strings
        assert_eq!(compare_values(&Value::from("9"), &Value::from("10")), Ordering::Greater);
        assert_eq!(compare_values(&Value::Null, &Value::from("a")), Ordering::Less);
        assert_eq!(compare_values(&Value::from("b"), &Value::from("a")), Ordering::Greater);
    }

    #[test]
    fn test_numbers_sort_before_non_numbers() {
        let (ten, nine_str, nine_half) = (Value::from(10), Value::from("9"), Value::from(9.5));
        assert_eq!(compare_values(&ten, &nine_str), Ordering::Less);
        assert_eq!(compare_values(&nine_half, &nine_str), Ordering::Less);
        assert_eq!(compare_values(&nine_half, &ten), Ordering::Less);
        assert_eq!(compare_values(&Value::Null, &Value::from(-1)), Ordering::Greater);
    }

    #[test]
    fn test_compare_large_int_with_float_exactly() {
        let big = Value::from(i64::MAX);
        let below = Value::from(i64::MAX - 1);
        // Nearest f64 to i64::MAX is 2^63, above both integers
        let float = Value::from(i64::MAX as f64);
        assert_eq!(compare_values(&big, &float), Ordering::Less);
        assert_eq!(compare_values(&below, &float), Ordering::Less);
        assert_eq!(compare_values(&below, &big), Ordering::Less);
        let (min, far_below) = (Value::from(i64::MIN), Value::from(-1e19));
        assert_eq!(compare_values(&min, &far_below), Ordering::Greater);
    }

    #[test]
    fn test_compare_float_edge_cases() {
        assert_eq!(compare_values(&Value::from(-0.0), &Value::from(0)), Ordering::Equal);
        assert_eq!(compare_values(&Value::from(-0.0), &Value::from(0.0)), Ordering::Equal);
        assert_eq!(compare_values(&Value::from(2), &Value::from(2.5)), Ordering::Less);
        assert_eq!(compare_values(&Value::from(-2), &Value::from(-2.5)), Ordering::Greater);
        let nan = Value::from(f64::NAN);
        assert_eq!(compare_values(&nan, &Value::from(i64::MAX)), Ordering::Greater);
        assert_eq!(compare_values(&nan, &Value::from("a")), Ordering::Less);
    }

    #[test]
    fn test_folded_matching() {
        let v = Value::from("Olivia Rhye");
        assert!(v.contains_folded("rhye"));
        assert!(v.contains_folded(""));
        assert!(!v.contains_folded("zzz"));
        assert!(Value::from("Active").equals_folded("active"));
        assert!(!Value::from("Inactive").equals_folded("active"));
    }

    #[test]
    fn test_deserialize_untagged() {
        let v: Value = serde_json::from_str("12").unwrap();
        assert_eq!(v, Value::Int(12));
        let v: Value = serde_json::from_str("1.5").unwrap();
        assert_eq!(v, Value::Float(1.5));
        let v: Value = serde_json::from_str("null").unwrap();
        assert_eq!(v, Value::Null);
        let v: Value = serde_json::from_str(r#"["a", 1]"#).unwrap();
        assert_eq!(v, Value::List(vec![Value::from("a"), Value::from(1)]));
    }

    #[test]
    fn test_nested_object() {
        let v: Value = serde_json::from_str(r#"{"city": "Austin", "zip": 78701}"#).unwrap();
        assert_eq!(v.type_name(), "map");
        assert_eq!(v.to_string(), "[object Object]");
    }
}
