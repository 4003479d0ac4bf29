//! Error types for report building.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when building or writing a report.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error (schema mismatches land here).
    #[error("{0}")]
    Common(#[from] oilsheet_common::Error),

    /// The intermediate document has not been written yet.
    #[error("{} not found; run `oilsheet extract` on the game bundle first", path.display())]
    MissingDocument { path: PathBuf },

    /// `oil_ids` lists an id with no record in the document.
    #[error("oil_ids lists record {0}, which is not in the document")]
    MissingOil(oilsheet_common::PathId),

    /// A modifier entry is not a JSON object.
    #[error("modifier {index} of definition {definition} is not an object")]
    InvalidModifier {
        definition: oilsheet_common::PathId,
        index: usize,
    },

    /// Spreadsheet writer error.
    #[cfg(feature = "xlsx-export")]
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, Error>;
