//! Whitespace normalization for extracted page text

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run to a single space and trim both ends.
///
/// Absent input normalizes to an empty string.
pub fn normalize(text: Option<&str>) -> String {
    let text = text.unwrap_or("").trim();
    WHITESPACE_RUN_RE.replace_all(text, " ").into_owned()
}

/// Split raw page text into lines.
///
/// Besides `\n` and `\r\n` this also breaks on the other line boundaries
/// PDF text layers tend to carry (bare `\r`, form feed, vertical tab, the
/// information separators, NEL and the Unicode line/paragraph separators).
/// A trailing boundary does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        // \r\n counts as a single boundary
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0B}'
            | '\u{0C}'
            | '\u{1C}'
            | '\u{1D}'
            | '\u{1E}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize(Some("  Lysine \t 2.1\n\n3.4  ")), "Lysine 2.1 3.4");
        assert_eq!(normalize(Some("Crude\u{a0}\u{a0}protein")), "Crude protein");
    }

    #[test]
    fn test_normalize_absent_and_blank() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize(Some(" \t\r\n ")), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize(Some("Table 1.02   Amino Acid\tDigestibility  "));
        assert_eq!(normalize(Some(&once)), once);
    }

    #[test]
    fn test_split_lines_boundaries() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\u{0C}b\u{2028}c"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }
}
