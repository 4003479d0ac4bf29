//! Bundle file discovery.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Glob for the game definitions bundle.
pub const BUNDLE_GLOB: &str = "gamedefinitions_assets_all_*.bundle";

/// Find the game definitions bundle in `dir`.
///
/// Only [`BUNDLE_GLOB`] is tried; other bundles in the directory never hold
/// the oil definitions. When several files match, a warning is logged and
/// the lexicographically first is returned. Which file that is can still
/// differ between platforms with different path collation.
pub fn find_bundle<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();

    let mut matches = glob_in(dir, BUNDLE_GLOB)?;
    if matches.is_empty() {
        return Err(Error::NoBundleFound {
            pattern: BUNDLE_GLOB.to_string(),
            dir: dir.to_path_buf(),
        });
    }

    matches.sort();
    if matches.len() > 1 {
        let names: Vec<_> = matches.iter().map(|p| p.display().to_string()).collect();
        tracing::warn!(
            "Found {} bundles matching {}: {}; using the first",
            matches.len(),
            BUNDLE_GLOB,
            names.join(", ")
        );
    }

    let chosen = matches.swap_remove(0);
    tracing::info!("Using bundle {}", chosen.display());
    Ok(chosen)
}

/// Resolve the bundle to read from an optional user-supplied path.
///
/// A file is used as is and a directory is searched with [`find_bundle`].
/// Without a path the working directory is searched. A path that does not
/// exist is [`Error::BundlePathNotFound`].
pub fn resolve_bundle(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        None => find_bundle("."),
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) if path.is_dir() => find_bundle(path),
        Some(path) => Err(Error::BundlePathNotFound(path.to_path_buf())),
    }
}

fn glob_in(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&escaped).join(pattern);

    let mut paths = Vec::new();
    for entry in glob::glob(&full.to_string_lossy())? {
        let path = entry?;
        if path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}
