//! reposync keeps a repository's generated files in sync with their sources.
//! It writes barrel (index) files for a source tree and embeds sample code
//! into the fenced code blocks of documents and doc comments.

/// Command-line interface module
pub mod cli;

/// Collaborator commands such as the formatter and type checker
pub mod command;

/// Configuration loading (reposync.json, reposync.yml, reposync.yaml)
pub mod config;

/// Default file names, markers and extensions
pub mod constants;

/// Sample embedding into fenced code blocks
pub mod embed;

/// Error types and handling
pub mod error;

/// Source extension validation
pub mod extension;

/// Barrel file generation
pub mod index;

/// Step orchestration for the `build` command
pub mod pipeline;

/// Sample slice extraction
pub mod sample;

/// Offset and indentation helpers
pub mod text;
