//! Enchantment oil report builder.
//!
//! Reads the intermediate [`Document`] written by the extractor, follows
//! each oil's reference chain and lays the result out as spreadsheet sheets:
//! one comparison sheet with every oil, then one sheet per beneficial-effect
//! category.
//!
//! # Quick Start
//!
//! ```no_run
//! use oilsheet_report::{build_report, load_document, write_workbook, ReportConfig};
//!
//! let document = load_document("tmp/data.json")?;
//! let config = ReportConfig::default();
//!
//! let report = build_report(&document, &config)?;
//! for sheet in &report.sheets {
//!     println!("{}: {} oils", sheet.name, sheet.rows.len());
//! }
//!
//! write_workbook(&report, "oils.xlsx", config.column_width)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Rows
//!
//! Every oil becomes a [`Row`] of field name → [`Cell`]: the item fields
//! (`displayName`, `includedInDemo`, `includedInEarlyAccess`, `basePrice`),
//! the definition's `CostsDurability`, then one column per modifier named
//! after its attribute. A multiplicative `Damage` modifier is stored under
//! `Damage%` so it never collides with flat damage.
//!
//! # Categories
//!
//! [`CATEGORIES`] maps a row field to a sign test. A row lands in every
//! category whose test passes on its value (missing counts as 0), or in
//! `MISC` when none does.

mod category;
mod cell;
mod config;
mod error;
mod report;
mod resolve;
mod row;

#[cfg(feature = "xlsx-export")]
pub mod export;

pub use category::{categorize, group_rows};
pub use cell::{Cell, FLAG_SET};
pub use config::{
    Category, Predicate, ReportConfig, CATEGORIES, COLUMN_LABELS, COMPARISON_SHEET,
    DEFAULT_COLUMN_WIDTH, FLAG_FIELDS, MISC_CATEGORY,
};
pub use error::{Error, Result};
pub use report::{build_report, load_document, Report, Sheet};
pub use resolve::{
    EnchantmentDefinition, Modifier, ModifierMode, OilItem, DAMAGE_ATTRIBUTE, DAMAGE_PERCENT,
};
pub use row::{flatten_oil, flatten_oils, Row, DEFINITION_FIELD, OIL_FIELDS};

#[cfg(feature = "xlsx-export")]
pub use export::write_workbook;

pub use oilsheet_common::Document;
