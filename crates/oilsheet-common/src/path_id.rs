//! Bundle object identifiers.
//!
//! Unity addresses every object inside a serialized file by a signed 64-bit
//! path id. References between objects are stored as
//! `{"m_FileID": 0, "m_PathID": <id>}` pairs in the decoded typetree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A bundle object identifier.
///
/// Serialized as a plain JSON number. When used as a JSON object key the
/// decimal string form is used instead (see [`crate::Document`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PathId(pub i64);

impl PathId {
    /// The null path id, used by Unity for empty references.
    pub const NULL: Self = Self(0);

    /// Create a path id from its raw value.
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Check if this is the null path id.
    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for PathId {
    #[inline]
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PathId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| Error::InvalidKey(s.to_string()))
    }
}
