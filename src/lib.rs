//! Nutrient table page dump for PDF documents using lopdf
//!
//! This crate provides:
//! - Keyword detection of pages that likely hold nutrient tables
//! - Best-effort splitting of their text lines into column values
//! - A JSON dump of the candidate pages for downstream mapping

pub mod detector;
pub mod dump;
pub mod extractor;
pub mod normalize;
pub mod tables;

pub use detector::{is_table_page, TableMarkers};
pub use dump::{build_dump, page_record, write_dump, DumpMeta, DumpOptions, PageRecord, TableDump};
pub use extractor::{PageSource, PdfPages};
pub use normalize::normalize;
pub use tables::{split_row, split_table_rows, RowCandidate};

use std::path::Path;

/// Scan a PDF file and collect its table pages
///
/// The document is held only while its pages are visited.
pub fn dump_tables<P: AsRef<Path>>(path: P, options: &DumpOptions) -> Result<TableDump, DumpError> {
    let path = path.as_ref();
    let source = PdfPages::open(path)?;
    let dump = build_dump(&source, path.to_string_lossy(), options);
    Ok(dump)
}

/// Scan a PDF held in memory; `name` is recorded as the source in the metadata
pub fn dump_tables_mem(
    buffer: &[u8],
    name: &str,
    options: &DumpOptions,
) -> Result<TableDump, DumpError> {
    let source = PdfPages::from_bytes(buffer)?;
    Ok(build_dump(&source, name, options))
}

/// Scan a PDF file and write the dump as JSON
///
/// Nothing is written unless every page was visited.
pub fn extract_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
    pdf_path: P,
    out_path: Q,
    options: &DumpOptions,
) -> Result<TableDump, DumpError> {
    let dump = dump_tables(pdf_path, options)?;
    write_dump(&dump, out_path)?;
    Ok(dump)
}

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<lopdf::Error> for DumpError {
    fn from(e: lopdf::Error) -> Self {
        DumpError::Parse(e.to_string())
    }
}
