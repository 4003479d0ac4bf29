//! Error types for the bundle crate.

use std::path::PathBuf;

use oilsheet_common::PathId;
use thiserror::Error;

/// Errors that can occur when reading bundles.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] oilsheet_common::Error),

    /// JSON encoding error while writing dumps or indexes.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No file in the search directory matched the bundle glob.
    #[error("no bundle file matching `{pattern}` found in {}", dir.display())]
    NoBundleFound { pattern: String, dir: PathBuf },

    /// An explicitly given bundle path does not exist.
    #[error("bundle path {} does not exist", .0.display())]
    BundlePathNotFound(PathBuf),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A directory entry could not be read while globbing.
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// Invalid record name pattern.
    #[error("invalid name pattern: {0}")]
    Regex(#[from] regex::Error),

    /// The bundle container could not be opened.
    #[error("failed to open bundle {}: {message}", path.display())]
    Open { path: PathBuf, message: String },

    /// An object's typetree could not be decoded.
    #[error("failed to decode object {path_id}: {message}")]
    Decode { path_id: PathId, message: String },

    /// A decoded typetree was not a field mapping.
    #[error("object {0} did not decode to a field mapping")]
    NotAMapping(PathId),
}

/// Result type for bundle operations.
pub type Result<T> = std::result::Result<T, Error>;
