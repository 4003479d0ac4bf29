//! Row categorization.
//!
//! Each category is a field and a sign test. A row belongs to every
//! category whose test passes on its value (missing values count as 0), and
//! to [`MISC_CATEGORY`] when none pass. Rows may therefore appear in several
//! category sheets.

use std::hash::BuildHasherDefault;

use hashbrown::HashMap as FastHashMap;
use rustc_hash::FxHasher;

use crate::config::{Category, MISC_CATEGORY};
use crate::Row;

type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Get the category names of a row, in category order.
pub fn categorize<'c>(row: &Row, categories: &'c [Category]) -> Vec<&'c str> {
    let matched: Vec<&str> = categories
        .iter()
        .filter(|c| c.predicate.test(row.number(c.field)))
        .map(|c| c.field)
        .collect();

    if matched.is_empty() {
        vec![MISC_CATEGORY]
    } else {
        matched
    }
}

/// Group row indices by category.
///
/// Returns `(category, row indices)` pairs in category order with
/// [`MISC_CATEGORY`] last; categories without rows are left out.
pub fn group_rows<'c>(rows: &[Row], categories: &'c [Category]) -> Vec<(&'c str, Vec<usize>)> {
    let mut groups: FxHashMap<&str, Vec<usize>> = FxHashMap::default();

    for (index, row) in rows.iter().enumerate() {
        for name in categorize(row, categories) {
            groups.entry(name).or_default().push(index);
        }
    }

    categories
        .iter()
        .map(|c| c.field)
        .chain(std::iter::once(MISC_CATEGORY))
        .filter_map(|name| groups.remove(name).map(|indices| (name, indices)))
        .collect()
}
