//! Unity bundle reader for oilsheet.
//!
//! Extracts every MonoBehaviour with embedded typetree metadata from a game
//! bundle into a [`Document`](oilsheet_common::Document), and records which
//! of them are oil items.
//!
//! Decoding the container format itself is delegated: the extractor works
//! against the [`ObjectSource`] trait, and the `unity` feature provides
//! [`UnityBundle`], an implementation backed by the `rabex` crate.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "unity")]
//! # fn main() -> oilsheet_bundle::Result<()> {
//! use oilsheet_bundle::{find_bundle, Extractor, NameRules, UnityBundle};
//!
//! let path = find_bundle(".")?;
//! let mut bundle = UnityBundle::open(&path)?;
//!
//! let rules = NameRules::default();
//! let document = Extractor::new(&rules).extract(&mut bundle, |done, total| {
//!     println!("{}/{}", done, total);
//! })?;
//! document.save("tmp/data.json")?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "unity"))]
//! # fn main() {}
//! ```

mod discover;
mod dump;
mod error;
mod extract;
mod pattern;
mod source;

#[cfg(feature = "unity")]
mod unity;

pub use discover::{find_bundle, resolve_bundle, BUNDLE_GLOB};
pub use dump::{dump_records, item_names, write_item_names, LABEL_FIELD};
pub use error::{Error, Result};
pub use extract::Extractor;
pub use pattern::{NameRules, BLACKLIST, DUMP_PATTERN, OIL_PATTERN};
pub use source::{
    object_data_range, type_index, MemorySource, ObjectClass, ObjectInfo, ObjectSource,
};

#[cfg(feature = "unity")]
pub use unity::UnityBundle;
