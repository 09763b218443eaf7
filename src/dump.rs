//! Table page dump: page records and the JSON document they end up in
//!
//! Pages are visited strictly in source order. Rejected pages leave no
//! trace; accepted pages keep their source page number.

use crate::detector::is_table_page;
use crate::extractor::PageSource;
use crate::normalize::{normalize, split_lines};
use crate::tables::{split_table_rows, RowCandidate};
use crate::DumpError;
use serde::{Serialize, Serializer};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Note stored in the dump metadata
pub const DEFAULT_NOTE: &str = "Raw dump of suspected nutrient-table pages. Use tools/apply_br_extracted_dump.cjs to map into skeleton.";

/// Options for building a dump
#[derive(Debug, Clone)]
pub struct DumpOptions {
    /// Number of normalized lines kept as page header
    pub head_lines: usize,
    /// Number of row candidates kept per page
    pub max_rows: usize,
    /// Free-text note written into the metadata
    pub note: String,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            head_lines: 40,
            max_rows: 80,
            note: DEFAULT_NOTE.to_string(),
        }
    }
}

/// One accepted page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    /// Page number in the source document (1-indexed)
    #[serde(rename = "page")]
    pub page_number: u32,
    /// Leading normalized lines, written joined by newlines
    #[serde(rename = "text_head", serialize_with = "join_lines")]
    pub header_lines: Vec<String>,
    /// Character count of the raw extracted text
    #[serde(rename = "text_len")]
    pub text_length: usize,
    /// Leading row candidates
    #[serde(rename = "rows_sample")]
    pub sample_rows: Vec<RowCandidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DumpMeta {
    pub pdf: String,
    pub note: String,
}

/// The whole dump, pages in ascending page order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDump {
    #[serde(rename = "_meta")]
    pub meta: DumpMeta,
    pub pages: Vec<PageRecord>,
}

fn join_lines<S: Serializer>(lines: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&lines.join("\n"))
}

/// Build the record for one page, or `None` if it does not look like a table page
pub fn page_record(page_number: u32, text: Option<&str>, options: &DumpOptions) -> Option<PageRecord> {
    let raw = text.unwrap_or("");
    if !is_table_page(Some(raw)) {
        return None;
    }

    // Header lines are fully normalized. The splitter needs the interior
    // spacing, so it gets the raw lines that survive normalization and
    // applies its filters to their collapsed form itself.
    let mut header_lines = Vec::new();
    let mut row_lines = Vec::new();
    for line in split_lines(raw) {
        let normalized = normalize(Some(line));
        if normalized.is_empty() {
            continue;
        }
        header_lines.push(normalized);
        row_lines.push(line);
    }

    let mut sample_rows = split_table_rows(&row_lines);
    sample_rows.truncate(options.max_rows);
    header_lines.truncate(options.head_lines);

    Some(PageRecord {
        page_number,
        header_lines,
        text_length: raw.chars().count(),
        sample_rows,
    })
}

/// Visit every page of a source and collect the table page records
pub fn build_dump<S: PageSource + ?Sized>(
    source: &S,
    pdf: impl Into<String>,
    options: &DumpOptions,
) -> TableDump {
    let page_count = source.page_count();
    let mut pages = Vec::new();

    for page_number in 1..=page_count {
        let text = source.page_text(page_number);
        match page_record(page_number, text.as_deref(), options) {
            Some(record) => {
                log::debug!(
                    "page {}: table page, {} header lines, {} rows",
                    page_number,
                    record.header_lines.len(),
                    record.sample_rows.len()
                );
                pages.push(record);
            }
            None => log::debug!("page {}: skipped", page_number),
        }
    }

    log::info!("{} of {} pages captured", pages.len(), page_count);

    TableDump {
        meta: DumpMeta {
            pdf: pdf.into(),
            note: options.note.clone(),
        },
        pages,
    }
}

/// Write a dump as indented UTF-8 JSON, creating parent directories as needed
pub fn write_dump<P: AsRef<Path>>(dump: &TableDump, path: P) -> Result<(), DumpError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, dump)?;
    writer.flush()?;
    Ok(())
}
