//! Extraction of the canonical code slice from a sample file.

use crate::config::Markers;
use crate::error::{Error, Result};
use crate::text::{dedent, line_start, next_line_start};
use std::path::Path;

/// Extracts the slice of `text` that gets embedded into documents.
///
/// Keeps the lines strictly between the ignore-above and ignore-below marker
/// lines (either side falls back to the file boundary when its marker is
/// absent), drops lines starting with the ignore-line marker, de-indents
/// and trims the result.
///
/// # Errors
/// * `Error::ValidationError` if ignore-below only appears above ignore-above,
///   or if the slice contains the fence-end token
pub fn extract_slice(text: &str, markers: &Markers) -> Result<String> {
    let start = match text.find(&markers.ignore_above) {
        Some(pos) => next_line_start(text, pos),
        None => 0,
    };
    let end = match text[start..].find(&markers.ignore_below) {
        Some(pos) => line_start(text, start + pos),
        None if text[..start].contains(&markers.ignore_below) => {
            return Err(Error::ValidationError(format!(
                "'{}' appears before '{}'",
                markers.ignore_below, markers.ignore_above
            )));
        }
        None => text.len(),
    };

    let kept = text[start..end]
        .lines()
        .filter(|line| !line.trim_start().starts_with(&markers.ignore_line))
        .collect::<Vec<_>>()
        .join("\n");
    let slice = dedent(&kept).trim().to_string();

    if slice.contains(&markers.fence_end) {
        return Err(Error::ValidationError(format!(
            "sample code contains the fence token '{}'",
            markers.fence_end
        )));
    }
    Ok(slice)
}

/// Reads `path` and extracts its slice.
///
/// # Errors
/// * `Error::NotFound` if the sample file does not exist
/// * `Error::ValidationError` naming the file if the slice is malformed
pub fn read_slice<P: AsRef<Path>>(path: P, markers: &Markers) -> Result<String> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound(format!("sample file '{}'", path.display())));
    }
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    extract_slice(&text, markers).map_err(|e| match e {
        Error::ValidationError(msg) => {
            Error::ValidationError(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}
