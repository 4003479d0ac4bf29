//! Report assembly.
//!
//! [`build_report`] is a pure function from a [`Document`] to a [`Report`]:
//! a list of sheets with relabeled headers and display-ready cells. Writing
//! the report to disk is done separately by [`crate::export`].

use std::io::ErrorKind;
use std::path::Path;

use oilsheet_common::Document;

use crate::category::group_rows;
use crate::config::COMPARISON_SHEET;
use crate::row::flatten_oils;
use crate::{Cell, Error, ReportConfig, Result, Row};

/// One worksheet's content.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Sheet name.
    pub name: String,
    /// Internal field name of each column.
    pub fields: Vec<String>,
    /// Header text of each column.
    pub headers: Vec<String>,
    /// Cells, one vector per row, aligned with `headers`.
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Lay out rows as a sheet.
    ///
    /// Columns are the union of the rows' fields in first-seen order. Absent
    /// fields become [`Cell::Empty`]; floats are rounded to two decimals.
    pub fn from_rows<'r, I>(name: impl Into<String>, rows: I, config: &ReportConfig) -> Self
    where
        I: IntoIterator<Item = &'r Row>,
        I::IntoIter: Clone,
    {
        let rows = rows.into_iter();

        let mut fields: Vec<String> = Vec::new();
        for row in rows.clone() {
            for field in row.fields() {
                if !fields.iter().any(|f| f == field) {
                    fields.push(field.to_string());
                }
            }
        }

        let headers = fields
            .iter()
            .map(|f| config.column_label(f).to_string())
            .collect();

        let rows = rows
            .map(|row| {
                fields
                    .iter()
                    .map(|f| row.get(f).map_or(Cell::Empty, Cell::rounded))
                    .collect()
            })
            .collect();

        Self {
            name: name.into(),
            fields,
            headers,
            rows,
        }
    }

    /// Get a cell by row index and internal field name.
    pub fn cell(&self, row: usize, field: &str) -> Option<&Cell> {
        let column = self.fields.iter().position(|f| f == field)?;
        self.rows.get(row)?.get(column)
    }
}

/// The full report: the comparison sheet followed by category sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub sheets: Vec<Sheet>,
}

impl Report {
    /// Get a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Get the comparison sheet.
    pub fn comparison(&self) -> &Sheet {
        &self.sheets[0]
    }
}

/// Load the intermediate document, mapping a missing file to
/// [`Error::MissingDocument`].
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    tracing::info!("Parsing json file: {}", path.display());

    match Document::open(path) {
        Ok(document) => Ok(document),
        Err(oilsheet_common::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
            Err(Error::MissingDocument {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Build the report for every oil in the document.
pub fn build_report(document: &Document, config: &ReportConfig) -> Result<Report> {
    let rows = flatten_oils(document, config)?;

    let mut sheets = vec![Sheet::from_rows(COMPARISON_SHEET, &rows, config)];
    for (category, indices) in group_rows(&rows, config.categories) {
        let name = config.column_label(category);
        tracing::debug!("Category {}: {} oils", name, indices.len());
        sheets.push(Sheet::from_rows(
            name,
            indices.iter().map(|&i| &rows[i]),
            config,
        ));
    }

    Ok(Report { sheets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MISC_CATEGORY;
    use crate::tests::{fields, oil_document, reference};
    use oilsheet_common::serde_json::json;
    use oilsheet_common::PathId;

    #[test]
    fn test_end_to_end_sheets() {
        let report = build_report(&oil_document(), &ReportConfig::default()).unwrap();

        let names: Vec<_> = report.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Comparison Table", "Recoil", "Damage%"]);

        for sheet in &report.sheets {
            assert_eq!(sheet.rows.len(), 1);
            assert_eq!(sheet.cell(0, "Kick"), Some(&Cell::Number(-5.0)));
            assert_eq!(sheet.cell(0, "Damage%"), Some(&Cell::Number(10.0)));
        }
    }

    #[test]
    fn test_headers_relabeled() {
        let report = build_report(&oil_document(), &ReportConfig::default()).unwrap();
        let sheet = report.comparison();
        assert_eq!(
            sheet.headers,
            [
                "Name",
                "Demo",
                "Early Access",
                "Base Price",
                "Costs Durability",
                "Recoil",
                "Damage%",
            ]
        );
    }

    #[test]
    fn test_union_columns_and_empty_cells() {
        let mut doc = oil_document();
        doc.insert(
            PathId(10),
            fields(json!({
                "m_Name": "Enchantment_LuckyOil",
                "displayName": "Lucky Oil",
                "includedInDemo": 0,
                "includedInEarlyAccess": 1,
                "basePrice": 80,
                "appliesEnchantment": reference(11),
            })),
        );
        doc.insert(
            PathId(11),
            fields(json!({
                "CostsDurability": 0,
                "modifiersApplied": [
                    { "attribute": reference(12), "modType": 100, "value": 1.23456 },
                ],
            })),
        );
        doc.insert(PathId(12), fields(json!({ "label": "Loot Chance Multiplier" })));
        doc.set_oil_ids(vec![PathId(1), PathId(10)]);

        let report = build_report(&doc, &ReportConfig::default()).unwrap();
        let sheet = report.comparison();

        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.headers.last().unwrap(), "Loot\nChance\nMultiplier");
        assert_eq!(sheet.cell(1, "Loot Chance Multiplier"), Some(&Cell::Number(1.23)));
        assert_eq!(sheet.cell(1, "Kick"), Some(&Cell::Empty));
        assert_eq!(sheet.cell(0, "Loot Chance Multiplier"), Some(&Cell::Empty));

        let misc = report.sheet(MISC_CATEGORY).unwrap();
        assert_eq!(misc.rows.len(), 1);
        assert_eq!(misc.cell(0, "displayName"), Some(&Cell::Text("Lucky Oil".into())));
        assert!(misc.cell(0, "Kick").is_none());
    }

    #[test]
    fn test_flag_columns_only_yes_or_blank() {
        let report = build_report(&oil_document(), &ReportConfig::default()).unwrap();
        let config = ReportConfig::default();

        for sheet in &report.sheets {
            for (column, field) in sheet.fields.iter().enumerate() {
                if !config.is_flag(field) {
                    continue;
                }
                for row in &sheet.rows {
                    let text = row[column].to_string();
                    assert!(text == "Yes" || text.is_empty(), "{field}: {text}");
                }
            }
        }
    }

    #[test]
    fn test_dangling_reference_fails_whole_report() {
        let mut doc = oil_document();
        doc.insert(
            PathId(2),
            fields(json!({
                "CostsDurability": 1,
                "modifiersApplied": [
                    { "attribute": reference(404), "modType": 100, "value": 1 },
                ],
            })),
        );

        let err = build_report(&doc, &ReportConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Common(oilsheet_common::Error::MissingRecord {
                id: PathId(404),
                referenced_by: PathId(2),
            })
        ));
    }

    #[test]
    fn test_unknown_oil_id_names_oil_ids() {
        let mut doc = oil_document();
        doc.set_oil_ids(vec![PathId(1), PathId(500)]);

        let err = build_report(&doc, &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingOil(PathId(500))));
    }

    #[test]
    fn test_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, Error::MissingDocument { .. }));
        assert!(err.to_string().contains("oilsheet extract"));
    }

    #[test]
    fn test_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        oil_document().save(&path).unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.oil_ids(), &[PathId(1)]);
    }
}
