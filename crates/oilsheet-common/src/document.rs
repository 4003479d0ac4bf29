//! The intermediate JSON document.
//!
//! The bundle reader writes one [`Document`] and the report builder reads it
//! back. On disk it is a single JSON object:
//!
//! ```json
//! {
//!     "-812": { "m_Name": "Enchantment_FireOil", ... },
//!     "431": { "m_Name": "EnchantmentDefinition_FireOil", ... },
//!     "oil_ids": [-812]
//! }
//! ```
//!
//! Path ids are written as string keys in ascending numeric order, followed
//! by the reserved [`OIL_IDS_KEY`].

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::{Error, PathId, Record, Result};

/// Reserved top-level key holding the list of oil record ids.
pub const OIL_IDS_KEY: &str = "oil_ids";

/// All decoded records of one bundle plus the ids of its oil records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    records: BTreeMap<PathId, Map<String, Value>>,
    oil_ids: Vec<PathId>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_slice(&data)
    }

    /// Parse a document from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(data)?;
        Self::from_value(value)
    }

    /// Build a document from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::NotAnObject);
        };

        let mut document = Self::new();
        for (key, value) in map {
            if key == OIL_IDS_KEY {
                document.oil_ids = parse_oil_ids(value)?;
                continue;
            }

            let id: PathId = key.parse()?;
            match value {
                Value::Object(fields) => {
                    document.records.insert(id, fields);
                }
                _ => return Err(Error::InvalidKey(key)),
            }
        }

        Ok(document)
    }

    /// Insert a decoded record, returning the fields it replaced.
    pub fn insert(&mut self, id: PathId, fields: Map<String, Value>) -> Option<Map<String, Value>> {
        self.records.insert(id, fields)
    }

    /// Replace the oil id list.
    pub fn set_oil_ids(&mut self, ids: Vec<PathId>) {
        self.oil_ids = ids;
    }

    /// Get the oil record ids.
    #[inline]
    pub fn oil_ids(&self) -> &[PathId] {
        &self.oil_ids
    }

    /// Number of records (the oil id list is not counted).
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the document holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by path id.
    #[inline]
    pub fn record(&self, id: PathId) -> Option<Record<'_>> {
        self.records.get(&id).map(|fields| Record::new(id, fields))
    }

    /// Resolve a reference found in `referenced_by`.
    ///
    /// Fails with [`Error::MissingRecord`] naming both ends of the reference.
    pub fn resolve(&self, id: PathId, referenced_by: PathId) -> Result<Record<'_>> {
        self.record(id)
            .ok_or(Error::MissingRecord { id, referenced_by })
    }

    /// Iterate over all records in ascending path id order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.records
            .iter()
            .map(|(id, fields)| Record::new(*id, fields))
    }

    /// Write the document as indented JSON.
    pub fn write_pretty<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Save the document to a file, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_pretty(&mut writer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::debug!("Wrote {} records to {}", self.len(), path.display());
        Ok(())
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len() + 1))?;
        for (id, fields) in &self.records {
            map.serialize_entry(&id.to_string(), fields)?;
        }
        map.serialize_entry(OIL_IDS_KEY, &self.oil_ids)?;
        map.end()
    }
}

/// Oil ids are numbers, but older documents stored them as strings.
fn parse_oil_ids(value: Value) -> Result<Vec<PathId>> {
    let Value::Array(items) = value else {
        return Err(Error::InvalidKey(OIL_IDS_KEY.to_string()));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Number(n) => n
                .as_i64()
                .map(PathId)
                .ok_or_else(|| Error::InvalidKey(n.to_string())),
            Value::String(s) => s.parse(),
            other => Err(Error::InvalidKey(other.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.insert(PathId(10), fields(json!({ "m_Name": "Enchantment_FireOil" })));
        doc.insert(PathId(-4), fields(json!({ "m_Name": "Kick", "label": "Kick" })));
        doc.set_oil_ids(vec![PathId(10)]);
        doc
    }

    #[test]
    fn test_keys_sorted_and_oil_ids_last() {
        let text = serde_json::to_string(&sample()).unwrap();
        let minus = text.find("\"-4\"").unwrap();
        let ten = text.find("\"10\"").unwrap();
        let oils = text.find("\"oil_ids\"").unwrap();
        assert!(minus < ten && ten < oils);
        assert!(text.ends_with("\"oil_ids\":[10]}"));
    }

    #[test]
    fn test_parse_back() {
        let doc = sample();
        let mut bytes = Vec::new();
        doc.write_pretty(&mut bytes).unwrap();

        let parsed = Document::from_slice(&bytes).unwrap();
        assert_eq!(parsed, doc);
        assert_eq!(parsed.record(PathId(-4)).unwrap().name(), Some("Kick"));
    }

    #[test]
    fn test_string_oil_ids_accepted() {
        let doc = Document::from_value(json!({
            "5": { "m_Name": "Enchantment_IceOil" },
            "oil_ids": ["5"],
        }))
        .unwrap();
        assert_eq!(doc.oil_ids(), &[PathId(5)]);
    }

    #[test]
    fn test_invalid_key() {
        let err = Document::from_value(json!({ "abc": {} })).unwrap_err();
        assert!(matches!(err, Error::InvalidKey(k) if k == "abc"));

        let err = Document::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::NotAnObject));
    }

    #[test]
    fn test_resolve_missing() {
        let doc = sample();
        assert!(doc.resolve(PathId(10), PathId(0)).is_ok());

        let err = doc.resolve(PathId(99), PathId(10)).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRecord { id: PathId(99), referenced_by: PathId(10) }
        ));
    }

    #[test]
    fn test_save_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmp").join("data.json");

        sample().save(&path).unwrap();

        let loaded = Document::open(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.oil_ids(), &[PathId(10)]);
    }
}
