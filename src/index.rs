//! Barrel (index) file generation.
//! Walks the source tree and writes, per directory, a barrel re-exporting every
//! exportable sibling module and every subdirectory's barrel.

use crate::config::IndexConfig;
use crate::constants::EMPTY_BARREL;
use crate::error::{Error, Result};
use globset::GlobSet;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One directory of the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub path: PathBuf,
    /// Sorted child directory names
    pub directories: Vec<String>,
    /// Sorted exportable file names
    pub files: Vec<String>,
}

/// What happened to a barrel file during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrelStatus {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug, Default)]
pub struct IndexReport {
    pub barrels: Vec<(PathBuf, BarrelStatus)>,
}

impl IndexReport {
    /// Barrels that were (or, in check mode, would be) written.
    pub fn changed(&self) -> Vec<&Path> {
        self.barrels
            .iter()
            .filter(|(_, status)| *status != BarrelStatus::Unchanged)
            .map(|(path, _)| path.as_path())
            .collect()
    }
}

fn entry_name(path: &Path, name: std::ffi::OsString) -> Result<String> {
    name.into_string().map_err(|raw| {
        Error::ValidationError(format!(
            "non UTF-8 entry name {:?} in '{}'",
            raw,
            path.display()
        ))
    })
}

/// Returns whether `name` is re-exported by its directory's barrel.
pub fn is_exportable(name: &str, config: &IndexConfig, excludes: &GlobSet) -> bool {
    name.ends_with(&config.source_extension)
        && name != config.barrel_file
        && !excludes.is_match(name)
}

/// Lists one directory. Symlinks are not followed.
///
/// # Errors
/// * `Error::IoError` naming `path` if the directory cannot be read
pub fn read_node<P: AsRef<Path>>(
    path: P,
    config: &IndexConfig,
    excludes: &GlobSet,
) -> Result<DirectoryNode> {
    let path = path.as_ref();
    let mut directories = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(path).map_err(|e| Error::io(path, e))? {
        let entry = entry.map_err(|e| Error::io(path, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        let name = entry_name(path, entry.file_name())?;

        if excludes.is_match(&name) {
            debug!("Skipping excluded entry {}", entry.path().display());
            continue;
        }
        if file_type.is_dir() {
            directories.push(name);
        } else if file_type.is_file() && is_exportable(&name, config, excludes) {
            files.push(name);
        }
    }

    // String ordering is byte order, which for UTF-8 is code-point order.
    directories.sort();
    files.sort();

    Ok(DirectoryNode {
        path: path.to_path_buf(),
        directories,
        files,
    })
}

/// Renders the barrel of `node`: subdirectories first, then files.
pub fn barrel_content(node: &DirectoryNode, config: &IndexConfig) -> String {
    if node.directories.is_empty() && node.files.is_empty() {
        return EMPTY_BARREL.to_string();
    }
    let barrel = config.barrel_output_name();
    let mut content = String::new();
    for dir in &node.directories {
        content.push_str(&format!("export * from './{dir}/{barrel}';\n"));
    }
    for file in &node.files {
        content.push_str(&format!("export * from './{}';\n", config.output_name(file)));
    }
    content
}

fn write_barrel(path: &Path, content: &str, write: bool) -> Result<BarrelStatus> {
    let status = match fs::read(path) {
        Ok(current) if current == content.as_bytes() => BarrelStatus::Unchanged,
        Ok(_) => BarrelStatus::Updated,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => BarrelStatus::Created,
        Err(e) => return Err(Error::io(path, e)),
    };
    if write && status != BarrelStatus::Unchanged {
        debug!("Writing barrel: {}", path.display());
        fs::write(path, content).map_err(|e| Error::io(path, e))?;
    }
    Ok(status)
}

/// Generates a barrel for every directory under `root`, `root` included.
///
/// Each directory is visited exactly once. With `write == false` nothing is
/// touched and the report lists which barrels are out of date. Barrels of
/// directories that no longer exist are left alone.
///
/// # Errors
/// * `Error::NotFound` if `root` is not a directory
/// * `Error::IoError` naming the offending path; barrels written before the
///   failure stay on disk
pub fn generate_indexes<P: AsRef<Path>>(
    root: P,
    config: &IndexConfig,
    write: bool,
) -> Result<IndexReport> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::NotFound(format!(
            "source root '{}'",
            root.display()
        )));
    }
    let excludes = config.exclude_set()?;
    let mut report = IndexReport::default();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !excludes.is_match(e.file_name())
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            Error::io(path, source)
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let node = read_node(entry.path(), config, &excludes)?;
        let content = barrel_content(&node, config);
        let barrel_path = entry.path().join(&config.barrel_file);
        let status = write_barrel(&barrel_path, &content, write)?;
        debug!("{:?}: {}", status, barrel_path.display());
        report.barrels.push((barrel_path, status));
    }
    Ok(report)
}
