//! Field values and field-path resolution for row data.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A sortable value resolved from a node's data.
///
/// Absent values are modelled as `Option::None` by callers, never as a variant.
///
/// # Example
///
/// ```
/// use treetable::value::FieldValue;
///
/// let name = FieldValue::from("Documents");
/// let size = FieldValue::from(4096i64);
/// assert!(size > FieldValue::from(1.5));
/// assert_ne!(name, size);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Date and time.
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Returns the string contents if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "string",
            FieldValue::DateTime(_) => "datetime",
        }
    }
}

// Numbers compare across Int/Float. Any other cross-type pairing is
// incomparable, so both `<` and `>` are false and `==` is false.
impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.partial_cmp(b),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.partial_cmp(b),
            (FieldValue::Int(a), FieldValue::Float(b)) => int_float_cmp(*a, *b),
            (FieldValue::Float(a), FieldValue::Int(b)) => {
                int_float_cmp(*b, *a).map(Ordering::reverse)
            }
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => a.partial_cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Exact comparison of an integer with a float.
///
/// Rounding to `f64` is monotonic, so a strict result of the rounded
/// comparison is already exact. On a tie the float is integral and within
/// `i64`'s range of magnitude, so both sides are compared as `i128`.
fn int_float_cmp(int: i64, float: f64) -> Option<Ordering> {
    match (int as f64).partial_cmp(&float)? {
        Ordering::Equal => Some(i128::from(int).cmp(&(float as i128))),
        ordering => Some(ordering),
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::DateTime(v)
    }
}

// =============================================================================
// RowData
// =============================================================================

/// Application data carried by a tree node.
///
/// Implement this to make a record type sortable by field path.
/// Paths that cannot be resolved return `None` and sort as absent.
pub trait RowData {
    /// Resolve a field path (e.g. `"size"` or `"owner.name"`) to a value.
    fn resolve_field(&self, path: &str) -> Option<FieldValue>;
}

impl RowData for serde_json::Value {
    fn resolve_field(&self, path: &str) -> Option<FieldValue> {
        if path.is_empty() {
            return None;
        }
        let mut current = self;
        for segment in path.split('.') {
            current = match current {
                serde_json::Value::Object(map) => map.get(segment)?,
                serde_json::Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        json_to_field(current)
    }
}

impl RowData for HashMap<String, FieldValue> {
    fn resolve_field(&self, path: &str) -> Option<FieldValue> {
        self.get(path).cloned()
    }
}

fn json_to_field(value: &serde_json::Value) -> Option<FieldValue> {
    match value {
        serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(FieldValue::Int)
            .or_else(|| n.as_f64().map(FieldValue::Float)),
        serde_json::Value::String(s) => Some(FieldValue::String(s.clone())),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_nested_paths() {
        let data = json!({"owner": {"name": "ana", "tags": ["a", "b"]}, "size": 12});
        assert_eq!(data.resolve_field("size"), Some(FieldValue::Int(12)));
        assert_eq!(
            data.resolve_field("owner.name"),
            Some(FieldValue::from("ana"))
        );
        assert_eq!(
            data.resolve_field("owner.tags.1"),
            Some(FieldValue::from("b"))
        );
    }

    #[test]
    fn unresolvable_paths_are_absent() {
        let data = json!({"owner": null, "size": 12});
        assert_eq!(data.resolve_field("owner.name"), None);
        assert_eq!(data.resolve_field("missing"), None);
        assert_eq!(data.resolve_field("size.bytes"), None);
        assert_eq!(data.resolve_field(""), None);
        assert_eq!(data.resolve_field("owner"), None);
    }

    #[test]
    fn numbers_compare_across_kinds() {
        assert!(FieldValue::Int(2) < FieldValue::Float(2.5));
        assert_eq!(FieldValue::Int(3), FieldValue::Float(3.0));
        assert_eq!(FieldValue::Int(1).partial_cmp(&FieldValue::from("1")), None);
    }

    #[test]
    fn large_ints_compare_exactly_with_floats() {
        let exact = 1i64 << 53;
        let above = FieldValue::Int(exact + 1);
        let float = FieldValue::Float(exact as f64);
        assert!(above > float);
        assert!(float < above);
        assert_ne!(above, float);
        assert_eq!(FieldValue::Int(exact), float);
        assert!(FieldValue::Int(i64::MAX) < FieldValue::Float(2f64.powi(63)));
        assert_eq!(FieldValue::Int(1).partial_cmp(&FieldValue::Float(f64::NAN)), None);
    }
}
