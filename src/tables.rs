//! Row splitting for table pages
//!
//! Once a PDF text layer is flattened to plain text, runs of two or more
//! spaces are the only column signal left; single spaces are treated as word
//! boundaries inside a cell. Each line is split on its own. There is no
//! column alignment across rows and no header row detection.

use crate::normalize::normalize;
use once_cell::sync::Lazy;
use regex::Regex;

/// Fields of one line, left to right. Always at least [`MIN_FIELDS`] long.
pub type RowCandidate = Vec<String>;

/// Minimum number of fields for a line to count as a row
pub const MIN_FIELDS: usize = 3;

/// Lines this long or shorter (in characters) are never rows
pub const MIN_ROW_CHARS: usize = 8;

static COLUMN_GAP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// Split a single line into a row candidate.
///
/// The digit and length filters look at the line as it reads once
/// whitespace is collapsed; only the split itself sees the original gaps.
/// Returns `None` for lines without a digit, lines of [`MIN_ROW_CHARS`]
/// characters or fewer, and lines with fewer than [`MIN_FIELDS`] columns.
pub fn split_row(line: &str) -> Option<RowCandidate> {
    let line = line.trim();
    let collapsed = normalize(Some(line));
    if !DIGIT_RE.is_match(&collapsed) || collapsed.chars().count() <= MIN_ROW_CHARS {
        return None;
    }

    let fields: Vec<String> = COLUMN_GAP_RE.split(line).map(str::to_string).collect();

    if fields.len() < MIN_FIELDS {
        return None;
    }
    Some(fields)
}

/// Split every line of a page, keeping only the lines that look like rows
pub fn split_table_rows<S: AsRef<str>>(lines: &[S]) -> Vec<RowCandidate> {
    lines
        .iter()
        .filter_map(|line| split_row(line.as_ref()))
        .collect()
}
