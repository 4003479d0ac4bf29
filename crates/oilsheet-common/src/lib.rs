//! Common types for oilsheet.
//!
//! This crate provides the data model shared by the bundle reader and the
//! report builder:
//!
//! - [`PathId`] - A bundle object identifier
//! - [`Record`] - One decoded MonoBehaviour typetree
//! - [`Document`] - The intermediate JSON document written between stages

mod document;
mod error;
mod path_id;
mod record;

pub use document::{Document, OIL_IDS_KEY};
pub use error::{Error, Result};
pub use path_id::PathId;
pub use record::{Record, NAME_FIELD};

/// Re-export serde_json so downstream crates agree on the value type.
pub use serde_json;
pub use serde_json::{Map, Value};
