//! Configuration handling for reposync.
//! Loads `reposync.json|yml|yaml` from the project root. Every field has a
//! default, so a repository without a configuration file still works.

use crate::command::ExternalCommand;
use crate::constants::{
    CONFIG_FILES, DEFAULT_BARREL_FILE, DEFAULT_EXCLUDE, DEFAULT_FENCE_END, DEFAULT_FENCE_START,
    DEFAULT_IGNORE_ABOVE, DEFAULT_IGNORE_BELOW, DEFAULT_IGNORE_LINE, DEFAULT_OUTPUT_EXTENSION,
    DEFAULT_SOURCE_EXTENSION, DEFAULT_SOURCE_ROOT,
};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub index: IndexConfig,
    pub embed: EmbedConfig,
    /// Collaborator commands run at the end of `build`
    pub checks: Vec<ExternalCommand>,
}

/// Settings of the index generator and of extension validation.
#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Source root, relative to the project root
    pub root: PathBuf,
    pub barrel_file: String,
    pub source_extension: String,
    pub output_extension: String,
    pub allowed_extensions: Vec<String>,
    /// Glob patterns matched against file and directory names
    pub exclude: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            barrel_file: DEFAULT_BARREL_FILE.to_string(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            allowed_extensions: vec![DEFAULT_SOURCE_EXTENSION.to_string()],
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IndexConfig {
    /// Compiles the exclude patterns.
    ///
    /// # Errors
    /// * `Error::ConfigError` if a pattern is not a valid glob
    pub fn exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            builder.add(Glob::new(pattern).map_err(|e| {
                Error::ConfigError(format!("invalid exclude pattern '{pattern}': {e}"))
            })?);
        }
        builder
            .build()
            .map_err(|e| Error::ConfigError(format!("exclude patterns: {e}")))
    }

    /// Barrel file name as seen by importers, e.g. `index.mts` -> `index.mjs`.
    pub fn barrel_output_name(&self) -> String {
        self.output_name(&self.barrel_file)
    }

    /// Maps a source file name to its compiled output name.
    pub fn output_name(&self, file_name: &str) -> String {
        match file_name.strip_suffix(&self.source_extension) {
            Some(stem) => format!("{stem}{}", self.output_extension),
            None => file_name.to_string(),
        }
    }
}

/// Tokens recognised in target documents and sample files.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Markers {
    pub fence_start: String,
    pub fence_end: String,
    pub ignore_above: String,
    pub ignore_below: String,
    pub ignore_line: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            fence_start: DEFAULT_FENCE_START.to_string(),
            fence_end: DEFAULT_FENCE_END.to_string(),
            ignore_above: DEFAULT_IGNORE_ABOVE.to_string(),
            ignore_below: DEFAULT_IGNORE_BELOW.to_string(),
            ignore_line: DEFAULT_IGNORE_LINE.to_string(),
        }
    }
}

/// Settings of the sample embedder.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedConfig {
    pub markers: Markers,
    /// Target path -> ordered sample paths, both relative to the project root
    pub mappings: IndexMap<String, Vec<String>>,
    /// Receives every modified target as trailing arguments
    pub formatter: Option<ExternalCommand>,
}

impl EmbedConfig {
    /// Rejects markers and mappings the embedder cannot work with.
    pub fn validate(&self) -> Result<()> {
        let markers = [
            ("fence_start", &self.markers.fence_start),
            ("fence_end", &self.markers.fence_end),
            ("ignore_above", &self.markers.ignore_above),
            ("ignore_below", &self.markers.ignore_below),
            ("ignore_line", &self.markers.ignore_line),
        ];
        for (name, value) in markers {
            if value.trim().is_empty() {
                return Err(Error::ValidationError(format!("marker '{name}' is empty")));
            }
        }
        for (target, samples) in &self.mappings {
            if samples.is_empty() {
                return Err(Error::ValidationError(format!(
                    "mapping for '{target}' lists no sample files"
                )));
            }
        }
        Ok(())
    }
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if neither format accepts the content
pub fn parse_config(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Returns the first configuration file present in `project_root`.
pub fn find_config<P: AsRef<Path>>(project_root: P) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|file| project_root.as_ref().join(file))
        .find(|path| path.is_file())
}

/// Loads the configuration of `project_root`, falling back to defaults when
/// no configuration file exists.
pub fn load_config<P: AsRef<Path>>(project_root: P) -> Result<Config> {
    match find_config(&project_root) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let content =
                std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            parse_config(&content)
        }
        None => {
            debug!(
                "No configuration file found (tried: {}), using defaults",
                CONFIG_FILES.join(", ")
            );
            Ok(Config::default())
        }
    }
}
