//! Decoded MonoBehaviour records.
//!
//! A [`Record`] is a view of one decoded typetree with typed accessors.
//! The `get_*` accessors return `Option` and are used for fields that may
//! legitimately be absent. The `*_field` accessors return a named
//! [`Error`] instead, for fields the caller cannot proceed without.

use serde_json::{Map, Value};

use crate::{Error, PathId, Result};

/// Field holding the object name in every MonoBehaviour typetree.
pub const NAME_FIELD: &str = "m_Name";

/// Field holding the target path id inside a reference object.
const PATH_ID_FIELD: &str = "m_PathID";

/// One decoded MonoBehaviour object.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    id: PathId,
    fields: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    /// Create a record view over a decoded field mapping.
    #[inline]
    pub fn new(id: PathId, fields: &'a Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Get the record's path id.
    #[inline]
    pub fn id(&self) -> PathId {
        self.id
    }

    /// Get the object name (`m_Name`).
    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        self.get_str(NAME_FIELD)
    }

    /// Get the full field mapping.
    #[inline]
    pub fn fields(&self) -> &'a Map<String, Value> {
        self.fields
    }

    /// Get a field value by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }

    /// Check if this record has a field with the given name.
    #[inline]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get a string field value.
    #[inline]
    pub fn get_str(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Get an integer field value.
    #[inline]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Get a numeric field value as a double.
    #[inline]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Get a boolean field value.
    ///
    /// Unity stores some flags as `UInt8`, so non-zero numbers count as true.
    #[inline]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(value_as_flag)
    }

    /// Get an array field.
    #[inline]
    pub fn get_array(&self, name: &str) -> Option<&'a Vec<Value>> {
        self.get(name).and_then(Value::as_array)
    }

    /// Get the path id a reference field points at.
    pub fn get_reference(&self, name: &str) -> Option<PathId> {
        self.get(name).and_then(reference_target)
    }

    /// Get a field value, failing if it is absent.
    pub fn field(&self, name: &str) -> Result<&'a Value> {
        self.get(name).ok_or_else(|| Error::MissingField {
            record: self.id,
            field: name.to_string(),
        })
    }

    /// Get a required string field.
    pub fn str_field(&self, name: &str) -> Result<&'a str> {
        self.field(name)?
            .as_str()
            .ok_or_else(|| self.invalid(name, "a string"))
    }

    /// Get a required integer field.
    pub fn i64_field(&self, name: &str) -> Result<i64> {
        self.field(name)?
            .as_i64()
            .ok_or_else(|| self.invalid(name, "an integer"))
    }

    /// Get a required numeric field.
    pub fn f64_field(&self, name: &str) -> Result<f64> {
        self.field(name)?
            .as_f64()
            .ok_or_else(|| self.invalid(name, "a number"))
    }

    /// Get a required array field.
    pub fn array_field(&self, name: &str) -> Result<&'a Vec<Value>> {
        self.field(name)?
            .as_array()
            .ok_or_else(|| self.invalid(name, "an array"))
    }

    /// Get the target of a required reference field.
    pub fn reference(&self, name: &str) -> Result<PathId> {
        reference_target(self.field(name)?).ok_or_else(|| self.invalid(name, "a reference"))
    }

    fn invalid(&self, name: &str, expected: &'static str) -> Error {
        Error::InvalidField {
            record: self.id,
            field: name.to_string(),
            expected,
        }
    }
}

/// Extract the target path id from a `{"m_FileID", "m_PathID"}` object.
pub(crate) fn reference_target(value: &Value) -> Option<PathId> {
    value
        .as_object()?
        .get(PATH_ID_FIELD)?
        .as_i64()
        .map(PathId)
}

/// Interpret a JSON value as a flag.
fn value_as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        _ => None,
    }
}
