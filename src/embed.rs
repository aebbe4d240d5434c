//! Embedding of sample code into fenced code blocks.
//!
//! For each target document the samples are spliced sequentially: every sample
//! fills the next fence found after the previous one, so earlier blocks are
//! never revisited. The fence markers themselves are kept, which makes a
//! second run over an already filled document produce the same text.

use crate::config::{EmbedConfig, Markers};
use crate::constants::DOCUMENT_EXTENSIONS;
use crate::error::{Error, Result};
use crate::sample::read_slice;
use crate::text::{line_start, next_line_start, prefix_lines};
use log::{debug, info};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// How slice lines are laid out inside a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Markdown-like document, code goes in unindented
    Document,
    /// Doc comment inside a source file, code lines get the comment prefix
    DocComment,
}

impl TargetKind {
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        let is_document = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                DOCUMENT_EXTENSIONS
                    .iter()
                    .any(|doc| ext.eq_ignore_ascii_case(doc))
            });
        if is_document {
            TargetKind::Document
        } else {
            TargetKind::DocComment
        }
    }
}

/// The part of a fence that could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFence {
    Start,
    End,
}

impl fmt::Display for MissingFence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingFence::Start => write!(f, "no code block left"),
            MissingFence::End => write!(f, "unterminated code block"),
        }
    }
}

/// Finds the first fence-start token at or after `cursor` that ends its
/// line, so "```ts" does not match a "```tsx" fence.
fn find_fence_start(text: &str, cursor: usize, token: &str) -> Option<usize> {
    let mut from = cursor;
    while let Some(pos) = text[from..].find(token) {
        let start = from + pos;
        let end = start + token.len();
        if text[end..next_line_start(text, end)].trim().is_empty() {
            return Some(start);
        }
        from = end;
    }
    None
}

/// Replaces the content of the first fence starting at or after `cursor`
/// with `slice` and returns the cursor just past that fence's end token.
///
/// The replaced region runs from the line after the fence-start token to the
/// beginning of the line holding the fence-end token. Inserted lines use the
/// line ending of the fence-start line.
pub fn splice_next(
    text: &mut String,
    cursor: usize,
    slice: &str,
    kind: TargetKind,
    markers: &Markers,
) -> std::result::Result<usize, MissingFence> {
    let start_token =
        find_fence_start(text, cursor, &markers.fence_start).ok_or(MissingFence::Start)?;
    let region_start = next_line_start(text, start_token);
    let end_token = text[region_start..]
        .find(&markers.fence_end)
        .map(|pos| region_start + pos)
        .ok_or(MissingFence::End)?;
    let region_end = line_start(text, end_token);

    let eol = if text[..region_start].ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    };
    let prefix = match kind {
        TargetKind::Document => "",
        TargetKind::DocComment => &text[line_start(text, start_token)..start_token],
    };
    let replacement = if slice.is_empty() {
        String::new()
    } else {
        format!("{}{eol}", prefix_lines(slice, prefix, eol))
    };

    let token_offset = end_token - region_end;
    text.replace_range(region_start..region_end, &replacement);
    Ok(region_start + replacement.len() + token_offset + markers.fence_end.len())
}

/// Result of embedding into one target.
#[derive(Debug, Clone)]
pub struct EmbeddedTarget {
    /// Target as configured, relative to the project root
    pub target: String,
    pub path: PathBuf,
    pub content: String,
    pub changed: bool,
}

/// Fills the code blocks of one target with the slices of `samples`.
///
/// # Errors
/// * `Error::NotFound` if the target, a sample or a fence is missing
pub fn embed_target<P: AsRef<Path>>(
    project_root: P,
    target: &str,
    samples: &[String],
    markers: &Markers,
) -> Result<EmbeddedTarget> {
    let project_root = project_root.as_ref();
    let path = project_root.join(target);
    if !path.is_file() {
        return Err(Error::NotFound(format!("target '{target}'")));
    }
    let original = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let kind = TargetKind::of(&path);

    let mut content = original.clone();
    let mut cursor = 0;
    for sample in samples {
        let slice = read_slice(project_root.join(sample), markers)?;
        cursor = splice_next(&mut content, cursor, &slice, kind, markers).map_err(|missing| {
            Error::NotFound(format!(
                "{missing} in '{target}' for sample '{sample}'"
            ))
        })?;
        debug!("Embedded {sample} into {target}");
    }

    Ok(EmbeddedTarget {
        changed: content != original,
        target: target.to_string(),
        path,
        content,
    })
}

#[derive(Debug, Default)]
pub struct EmbedReport {
    pub targets: Vec<EmbeddedTarget>,
}

impl EmbedReport {
    pub fn changed(&self) -> Vec<&Path> {
        self.targets
            .iter()
            .filter(|t| t.changed)
            .map(|t| t.path.as_path())
            .collect()
    }
}

/// Embeds every configured mapping.
///
/// All targets are computed before anything is written, so any failure
/// leaves every file untouched. With `write` set, changed targets are
/// written and handed to the formatter.
pub fn embed_samples<P: AsRef<Path>>(
    project_root: P,
    config: &EmbedConfig,
    write: bool,
) -> Result<EmbedReport> {
    let project_root = project_root.as_ref();
    config.validate()?;

    let mut report = EmbedReport::default();
    for (target, samples) in &config.mappings {
        report
            .targets
            .push(embed_target(project_root, target, samples, &config.markers)?);
    }
    if !write {
        return Ok(report);
    }

    let mut changed = Vec::new();
    for target in report.targets.iter().filter(|t| t.changed) {
        info!("Updating {}", target.path.display());
        fs::write(&target.path, &target.content).map_err(|e| Error::io(&target.path, e))?;
        changed.push(target.target.as_str());
    }
    // Relative to the project root, where the formatter runs.
    if let Some(formatter) = &config.formatter {
        if !changed.is_empty() {
            formatter.run_with(project_root, changed.as_slice())?;
        }
    }
    Ok(report)
}
