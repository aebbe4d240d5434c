//! Byte-offset and indentation helpers shared by slice extraction and splicing.
//! Offsets are byte offsets into UTF-8 text and always land on char boundaries
//! because they are derived from ASCII `'\n'` positions or `find` results.

/// Offset of the first byte of the line containing `pos`.
pub fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Offset just past the `'\n'` ending the line containing `pos`, or the end
/// of the text for the last line.
pub fn next_line_start(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i + 1)
}

/// Number of leading ASCII spaces.
pub fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Removes the smallest common run of leading spaces from every non-blank
/// line. Line order and relative indentation are preserved.
pub fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(leading_spaces)
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[indent..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefixes every line with `prefix` and joins the lines with `eol`. Blank
/// lines get the prefix with its trailing whitespace removed.
pub fn prefix_lines(text: &str, prefix: &str, eol: &str) -> String {
    let bare = prefix.trim_end();
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                bare.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join(eol)
}
