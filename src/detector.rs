//! Keyword-based detection of pages that likely carry nutrient tables
//!
//! Matching runs on the raw extracted text of a single page: it is
//! substring-based and case-sensitive, with no normalization and no
//! context from neighbouring pages. The net is deliberately wide; a page
//! that mentions "Table 1." in passing is accepted as well.

/// Keyword vocabulary for table-page detection
#[derive(Debug, Clone)]
pub struct TableMarkers {
    /// Required caption marker for the keyword rule (default: "Table")
    pub caption: &'static str,
    /// Topic keywords, any one of which must accompany the caption
    pub topics: Vec<&'static str>,
    /// Markers that accept a page on their own (default: "Table 1.")
    pub standalone: Vec<&'static str>,
}

impl Default for TableMarkers {
    fn default() -> Self {
        Self {
            caption: "Table",
            topics: vec!["Amino Acid", "Main Components", "Digestibility"],
            standalone: vec!["Table 1."],
        }
    }
}

impl TableMarkers {
    /// Check raw page text against this vocabulary
    pub fn matches(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        let captioned_topic =
            text.contains(self.caption) && self.topics.iter().any(|t| text.contains(t));

        captioned_topic || self.standalone.iter().any(|m| text.contains(m))
    }
}

/// Decide whether a page's extracted text looks like a nutrient table page
pub fn is_table_page(text: Option<&str>) -> bool {
    text.map_or(false, |t| TableMarkers::default().matches(t))
}
