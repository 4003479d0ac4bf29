//! Oilsheet - enchantment oil extraction and report library.
//!
//! This crate provides a unified interface to the oilsheet crates.
//!
//! # Crates
//!
//! - [`oilsheet_common`] - Record model and the intermediate JSON document
//! - [`oilsheet_bundle`] - Bundle discovery and MonoBehaviour extraction
//! - [`oilsheet_report`] - Oil flattening, categorization and XLSX output
//!
//! # Example
//!
//! ```no_run
//! use oilsheet::prelude::*;
//!
//! let document = load_document("tmp/data.json")?;
//! let config = ReportConfig::default();
//! let report = build_report(&document, &config)?;
//!
//! write_workbook(&report, "oils.xlsx", config.column_width)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use oilsheet_bundle as bundle;
pub use oilsheet_common as common;
pub use oilsheet_report as report;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use oilsheet_bundle::{find_bundle, Extractor, NameRules, ObjectSource};
    pub use oilsheet_common::{Document, PathId, Record};
    pub use oilsheet_report::{build_report, load_document, Report, ReportConfig};

    #[cfg(feature = "xlsx-export")]
    pub use oilsheet_report::write_workbook;

    #[cfg(feature = "unity")]
    pub use oilsheet_bundle::UnityBundle;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
