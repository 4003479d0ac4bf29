//! Per-record dumps and the item name index.

use std::fs::{self, File};
use std::hash::BuildHasherDefault;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hashbrown::HashMap as FastHashMap;
use oilsheet_common::{Document, Map, Value};
use rustc_hash::FxHasher;

use crate::{NameRules, Result};

type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Field carrying the in-game label of items and attributes.
pub const LABEL_FIELD: &str = "label";

/// Write each dump-worthy record to `dir/<m_Name>.json`.
///
/// Names repeat across records (e.g. two `PenetrationOil` variants); the
/// n-th repeat of a name is written as `<m_Name>_<n>.json`. Repeats are
/// counted over all non-blacklisted records, in path id order. Path
/// separators in names are replaced, so every file lands directly in `dir`.
///
/// Returns the paths written.
pub fn dump_records<P: AsRef<Path>>(
    document: &Document,
    rules: &NameRules,
    dir: P,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut name_counts: FxHashMap<&str, usize> = FxHashMap::default();
    let mut written = Vec::new();

    for record in document.records() {
        let name = record.name().unwrap_or_default();
        if rules.is_blacklisted(name) {
            continue;
        }

        let count = name_counts.entry(name).or_insert(0);
        let stem = file_stem(name);
        let file_name = if *count > 0 {
            tracing::debug!("Duplicated name: {}", name);
            format!("{}_{}.json", stem, count)
        } else {
            format!("{}.json", stem)
        };
        *count += 1;

        if !rules.is_dumped(name) {
            continue;
        }

        let path = dir.join(file_name);
        write_json(&path, record.fields())?;
        written.push(path);
    }

    tracing::info!("Dumped {} records to {}", written.len(), dir.display());
    Ok(written)
}

/// Build the path id → label index for every record with a `label`.
pub fn item_names(document: &Document) -> Map<String, Value> {
    document
        .records()
        .filter_map(|record| {
            let label = record.get_str(LABEL_FIELD)?;
            Some((record.id().to_string(), Value::String(label.to_string())))
        })
        .collect()
}

/// Write the item name index to a JSON file.
pub fn write_item_names<P: AsRef<Path>>(document: &Document, path: P) -> Result<usize> {
    let names = item_names(document);
    write_json(path.as_ref(), &names)?;
    Ok(names.len())
}

/// Make a record name usable as a single file name component.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c if std::path::is_separator(c) => '_',
            c => c,
        })
        .collect()
}

fn write_json(path: &Path, value: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    oilsheet_common::serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
