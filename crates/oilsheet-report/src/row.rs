//! Flattening oils into rows.

use indexmap::IndexMap;
use oilsheet_common::{Document, PathId, Value};

use crate::resolve::OilItem;
use crate::{Cell, ReportConfig, Result};

/// Oil item fields copied into every row, in column order.
pub const OIL_FIELDS: &[&str] = &[
    "displayName",
    "includedInDemo",
    "includedInEarlyAccess",
    "basePrice",
];

/// Definition field copied into every row after the oil fields.
pub const DEFINITION_FIELD: &str = "CostsDurability";

/// One oil flattened into field name → cell, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: IndexMap<String, Cell>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell. An existing field keeps its position.
    pub fn insert(&mut self, field: impl Into<String>, cell: Cell) {
        self.cells.insert(field.into(), cell);
    }

    /// Get a cell by field name.
    #[inline]
    pub fn get(&self, field: &str) -> Option<&Cell> {
        self.cells.get(field)
    }

    /// Numeric value of a field, 0 when absent.
    #[inline]
    pub fn number(&self, field: &str) -> f64 {
        self.get(field).map_or(0.0, Cell::as_f64)
    }

    /// Iterate over field names in column order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Iterate over `(field, cell)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn insert_value(&mut self, field: &str, value: &Value, config: &ReportConfig) {
        let cell = if config.is_flag(field) {
            Cell::flag_from_value(value)
        } else {
            Cell::from_value(value)
        };
        self.insert(field, cell);
    }
}

/// Flatten one oil: its item fields, its definition's durability flag and
/// every modifier as attribute name → value.
pub fn flatten_oil(document: &Document, oil_id: PathId, config: &ReportConfig) -> Result<Row> {
    let oil = OilItem::load(document, oil_id)?;
    let mut row = Row::new();

    for field in OIL_FIELDS {
        row.insert_value(field, oil.record().field(field)?, config);
    }

    let definition = oil.definition(document)?;
    row.insert_value(DEFINITION_FIELD, definition.costs_durability()?, config);

    let definition_id = definition.record().id();
    for modifier in definition.modifiers()? {
        let attribute = modifier.attribute_name(document, definition_id)?;
        let column = modifier.column_name(attribute);
        row.insert_value(column, &modifier.value, config);
    }

    Ok(row)
}

/// Flatten every oil listed in the document, in list order.
pub fn flatten_oils(document: &Document, config: &ReportConfig) -> Result<Vec<Row>> {
    let total = document.oil_ids().len();
    document
        .oil_ids()
        .iter()
        .enumerate()
        .map(|(i, id)| -> Result<Row> {
            let row = flatten_oil(document, *id, config)?;
            let name = row.get("displayName").map(Cell::to_string).unwrap_or_default();
            tracing::info!("Parsing {:>3}/{} {}", i + 1, total, name);
            Ok(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{fields, oil_document, reference};
    use oilsheet_common::serde_json::json;

    #[test]
    fn test_flatten_kick_and_damage_percent() {
        let doc = oil_document();
        let row = flatten_oil(&doc, PathId(1), &ReportConfig::default()).unwrap();

        assert_eq!(row.get("Kick"), Some(&Cell::Number(-5.0)));
        assert_eq!(row.get("Damage%"), Some(&Cell::Number(10.0)));
        assert_eq!(row.get("Damage"), None);
        assert_eq!(row.get("displayName"), Some(&Cell::Text("Recoil Oil".into())));
        assert_eq!(row.get("basePrice"), Some(&Cell::Integer(150)));
    }

    #[test]
    fn test_column_order() {
        let doc = oil_document();
        let row = flatten_oil(&doc, PathId(1), &ReportConfig::default()).unwrap();

        let fields: Vec<_> = row.fields().collect();
        assert_eq!(
            fields,
            [
                "displayName",
                "includedInDemo",
                "includedInEarlyAccess",
                "basePrice",
                "CostsDurability",
                "Kick",
                "Damage%",
            ]
        );
    }

    #[test]
    fn test_flags() {
        let doc = oil_document();
        let row = flatten_oil(&doc, PathId(1), &ReportConfig::default()).unwrap();

        assert_eq!(row.get("includedInDemo"), Some(&Cell::Flag(true)));
        assert_eq!(row.get("includedInEarlyAccess"), Some(&Cell::Flag(false)));
        assert_eq!(row.get("CostsDurability").unwrap().to_string(), "Yes");
    }

    #[test]
    fn test_flat_damage_stays_damage() {
        let mut doc = oil_document();
        doc.insert(
            PathId(2),
            fields(json!({
                "CostsDurability": 0,
                "modifiersApplied": [
                    { "attribute": reference(4), "modType": 100, "value": 3.0 },
                ],
            })),
        );

        let row = flatten_oil(&doc, PathId(1), &ReportConfig::default()).unwrap();
        assert_eq!(row.get("Damage"), Some(&Cell::Number(3.0)));
        assert_eq!(row.get("Damage%"), None);
    }

    #[test]
    fn test_missing_oil_field_fails() {
        let mut doc = oil_document();
        doc.insert(
            PathId(1),
            fields(json!({ "displayName": "Broken", "appliesEnchantment": reference(2) })),
        );

        let err = flatten_oil(&doc, PathId(1), &ReportConfig::default()).unwrap_err();
        assert!(err.to_string().contains("includedInDemo"));
    }

    #[test]
    fn test_flatten_all_listed_oils() {
        let doc = oil_document();
        let rows = flatten_oils(&doc, &ReportConfig::default()).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
