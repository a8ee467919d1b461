//! Common utility functions shared across the codebase.

use std::{fs, path::Path};

use anyhow::{Context, Result};

/// Share of non-whitespace characters that are alphabetic, in `0.0..=1.0`.
///
/// Returns 0.0 for empty or whitespace-only input.
pub fn alphabetic_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut alpha = 0usize;
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        total += 1;
        if c.is_alphabetic() {
            alpha += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        alpha as f64 / total as f64
    }
}

/// Trim and collapse every internal whitespace run to a single space.
///
/// ```
/// use locsmith::utils::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  Welcome \n   back "), "Welcome back");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find the 1-based line number for a byte offset using binary search.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// 1-based (line, column) of a byte offset. Columns count chars, not bytes.
pub fn offset_to_position(content: &str, line_index: &[usize], offset: usize) -> (usize, usize) {
    let line = offset_to_line(line_index, offset);
    let line_start = line_index[line - 1];
    let col = content[line_start..offset].chars().count() + 1;
    (line, col)
}

/// The full text of a 1-based line, without its line terminator.
pub fn line_text<'a>(content: &'a str, line_index: &[usize], line: usize) -> &'a str {
    let start = line_index[line - 1];
    let end = line_index
        .get(line)
        .map(|next| next - 1)
        .unwrap_or(content.len());
    content[start..end].trim_end_matches('\r')
}

/// `path` relative to `root` with `/` separators, or the full path when it
/// lies outside `root`.
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Replace a file's content in one step.
///
/// The new content is written next to the target and renamed over it, so a
/// crash never leaves a half-written file behind.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}
