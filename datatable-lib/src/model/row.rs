//! Dynamic table row

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Name of the field every row must carry as its identifier.
pub const ID_FIELD: &str = "id";

/// Identifier of a row, taken from the stringified `id` field.
///
/// Numeric and string identifiers share one key space: a row with
/// `id: 1` and a row with `id: "1"` have the same `RowId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Creates a row id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for RowId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

/// A record displayed as one table row.
///
/// Rows hold field values as a `HashMap<String, Value>`. The engine reads
/// rows but never mutates them.
///
/// Rows serialize to and from flat JSON objects.
///
/// # Example
///
/// ```
/// use datatable_lib::model::Row;
///
/// let row = Row::new()
///     .set("id", 1)
///     .set("name", "Olivia Rhye")
///     .set("role", "Product Designer");
///
/// assert_eq!(row.id().unwrap().as_str(), "1");
/// assert_eq!(row.get("name").unwrap().as_str(), Some("Olivia Rhye"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub(crate) fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a row with the given identifier.
    pub fn with_id(id: impl Into<Value>) -> Self {
        Self::new().set(ID_FIELD, id)
    }

    /// Returns the row identifier, or `None` if `id` is absent or null.
    pub fn id(&self) -> Option<RowId> {
        match self.fields.get(ID_FIELD) {
            None | Some(Value::Null) => None,
            Some(value) => Some(RowId(value.to_string())),
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, treating an absent field as `Null`.
    pub fn value(&self, field: &str) -> &Value {
        const NULL: &Value = &Value::Null;
        self.fields.get(field).unwrap_or(NULL)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_share_key_space() {
        assert_eq!(Row::with_id(7).id(), Some(RowId::from("7")));
        assert_eq!(Row::with_id("7").id(), Some(RowId::from(7)));
    }

    #[test]
    fn test_null_id_is_missing() {
        assert_eq!(Row::new().id(), None);
        assert_eq!(Row::new().set("id", Value::Null).id(), None);
    }

    #[test]
    fn test_absent_field_reads_as_null() {
        let row = Row::with_id(1);
        assert!(row.value("email").is_null());
        assert_eq!(row.value("email").to_string(), "");
    }

    #[test]
    fn test_deserialize_flat_object() {
        let json = r#"{"id": "3", "name": "Lana Steiner", "teams": ["Design", "Product"], "employees": 42}"#;
        let row: Row = serde_json::from_str(json).unwrap();

        assert_eq!(row.id(), Some(RowId::from("3")));
        assert_eq!(row.value("teams").to_string(), "Design,Product");
        assert_eq!(row.value("employees"), &Value::Int(42));
    }

    #[test]
    fn test_deserialize_nested_object_field() {
        let json = r#"{"id": 9, "name": "Kate Morrison", "address": {"city": "Austin"}}"#;
        let row: Row = serde_json::from_str(json).unwrap();

        assert_eq!(row.id(), Some(RowId::from(9)));
        assert_eq!(row.value("address").to_string(), "[object Object]");
    }

    #[test]
    fn test_serialize_flat_object() {
        let row = Row::with_id(1).set("name", "Drew Cano");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Drew Cano"}));
    }
}
