//! Error types for oilsheet-common.

use thiserror::Error;

use crate::PathId;

/// Common error type for oilsheet operations.
///
/// Every variant except `Io` and `Json` describes a record that no longer
/// matches the shape the tool expects, which means the game data changed.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record lacks a field the caller requires.
    #[error("record {record} has no field `{field}`")]
    MissingField { record: PathId, field: String },

    /// A field exists but holds the wrong kind of value.
    #[error("field `{field}` of record {record} is not {expected}")]
    InvalidField {
        record: PathId,
        field: String,
        expected: &'static str,
    },

    /// A reference points at a path id absent from the document.
    #[error("record {id} (referenced by {referenced_by}) is not in the document")]
    MissingRecord { id: PathId, referenced_by: PathId },

    /// A document key or id that is not a valid path id.
    #[error("invalid path id: {0:?}")]
    InvalidKey(String),

    /// The document's top level is not a JSON object.
    #[error("document is not a JSON object")]
    NotAnObject,
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
