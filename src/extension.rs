//! Source extension validation.
//! Run before index generation so that stray `.ts`/`.js` files under the
//! source root are reported instead of silently missing from the barrels.

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// Checks that every file under `root` carries an allowed extension.
///
/// Excluded directories are skipped. Excluded files are still checked:
/// `a.test.mts` is not exported, but it is a legitimate source file.
///
/// # Errors
/// * `Error::NotFound` if `root` is not a directory
/// * `Error::ValidationError` naming the first offending file
pub fn validate_extensions<P: AsRef<Path>>(root: P, config: &IndexConfig) -> Result<()> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::NotFound(format!("source root '{}'", root.display())));
    }
    let excludes = config.exclude_set()?;

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !e.file_type().is_dir() || !excludes.is_match(e.file_name())
        });

    let mut checked = 0usize;
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            Error::io(path, source)
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !config
            .allowed_extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
        {
            return Err(Error::ValidationError(format!(
                "'{}' does not use an allowed extension ({})",
                entry.path().display(),
                config.allowed_extensions.join(", ")
            )));
        }
        checked += 1;
    }
    debug!("{checked} source files have allowed extensions");
    Ok(())
}
