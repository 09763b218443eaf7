//! Per-page plain text extraction using lopdf
//!
//! The dump pipeline only needs the plain text of each page, in page order.
//! [`PageSource`] is that contract; [`PdfPages`] fulfils it for PDF files.

use crate::DumpError;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

/// Anything that yields plain text per page, in page order
pub trait PageSource {
    /// Total number of pages; stable for the lifetime of the source
    fn page_count(&self) -> u32;

    /// Plain text of a page (1-indexed), `None` when nothing can be extracted
    fn page_text(&self, page: u32) -> Option<String>;
}

/// A loaded PDF document, read page by page
pub struct PdfPages {
    doc: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfPages {
    /// Open a PDF file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DumpError> {
        let doc = Document::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Load a PDF from a memory buffer
    pub fn from_bytes(buffer: &[u8]) -> Result<Self, DumpError> {
        let doc = Document::load_mem(buffer)?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: Document) -> Self {
        let pages = doc.get_pages();
        Self { doc, pages }
    }
}

impl PageSource for PdfPages {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Option<String> {
        let &page_id = self.pages.get(&page)?;

        if let Some(text) = page_lines(&self.doc, page_id) {
            return Some(text);
        }

        // lopdf runs every line of a BT/ET block together, so it only stands
        // in when the content walk finds nothing.
        match self.doc.extract_text(&[page]) {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => None,
            Err(e) => {
                log::debug!("page {}: no extractable text ({})", page, e);
                None
            }
        }
    }
}

/// Baselines closer than this are the same line
const SAME_LINE_TOLERANCE: f32 = 3.0;

/// Rebuild a page's text from its content stream, one line per baseline.
///
/// Text moved to a new baseline (`Td`, `TD`, `Tm`) starts a new line, and so
/// do `T*`, `'` and `"`. A move along the current baseline is a jump to the
/// next cell and leaves a two-space gap. Strings inside a `TJ` array
/// separated by a large negative adjustment get a single space.
fn page_lines(doc: &Document, page_id: ObjectId) -> Option<String> {
    let content_data = doc.get_page_content(page_id).ok()?;
    let content = Content::decode(&content_data).ok()?;

    let encodings: BTreeMap<Vec<u8>, _> = doc
        .get_page_fonts(page_id)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, font)| font.get_font_encoding(doc).ok().map(|enc| (name, enc)))
        .collect();
    let decode = |font: &[u8], bytes: &[u8]| -> String {
        encodings
            .get(font)
            .and_then(|enc| Document::decode_text(enc, bytes).ok())
            .unwrap_or_else(|| decode_raw(bytes))
    };

    let mut lines = LineBuilder::default();
    let mut font: Vec<u8> = Vec::new();
    // Text line matrix [a b c d e f]
    let mut tlm = [1.0f32, 0.0, 0.0, 1.0, 0.0, 0.0];

    for op in &content.operations {
        let operands = &op.operands;
        let shown = match op.operator.as_str() {
            "BT" => {
                tlm = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                continue;
            }
            "Tf" => {
                if let Some(Ok(name)) = operands.first().map(Object::as_name) {
                    font = name.to_vec();
                }
                continue;
            }
            "Td" | "TD" if operands.len() >= 2 => {
                let (tx, ty) = (number(&operands[0]), number(&operands[1]));
                tlm[4] += tx * tlm[0] + ty * tlm[2];
                tlm[5] += tx * tlm[1] + ty * tlm[3];
                lines.move_to(tlm[5]);
                continue;
            }
            "Tm" if operands.len() >= 6 => {
                for (slot, operand) in tlm.iter_mut().zip(operands) {
                    *slot = number(operand);
                }
                lines.move_to(tlm[5]);
                continue;
            }
            "T*" => {
                lines.break_line();
                continue;
            }
            "Tj" | "TJ" => operands.first(),
            "'" => {
                lines.break_line();
                operands.first()
            }
            // aw ac string
            "\"" => {
                lines.break_line();
                operands.get(2)
            }
            _ => continue,
        };

        match shown {
            Some(Object::String(bytes, _)) => lines.push_text(&decode(&font, bytes), tlm[5]),
            Some(Object::Array(parts)) => {
                for part in parts {
                    match part {
                        Object::String(bytes, _) => lines.push_text(&decode(&font, bytes), tlm[5]),
                        Object::Integer(i) if *i < -100 => lines.push_text(" ", tlm[5]),
                        Object::Real(r) if *r < -100.0 => lines.push_text(" ", tlm[5]),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    lines.finish()
}

/// Accumulates shown text into lines keyed by baseline
#[derive(Default)]
struct LineBuilder {
    lines: Vec<String>,
    current: String,
    baseline: Option<f32>,
}

impl LineBuilder {
    fn push_text(&mut self, text: &str, y: f32) {
        if self.current.is_empty() {
            self.baseline = Some(y);
        }
        self.current.push_str(text);
    }

    fn move_to(&mut self, y: f32) {
        match self.baseline {
            Some(baseline) if !self.current.trim().is_empty() => {
                if (baseline - y).abs() < SAME_LINE_TOLERANCE {
                    self.current.push_str("  ");
                } else {
                    self.break_line();
                }
            }
            _ => {}
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        if !line.trim().is_empty() {
            self.lines.push(line);
        }
        self.baseline = None;
    }

    fn finish(mut self) -> Option<String> {
        self.break_line();
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.join("\n"))
        }
    }
}

fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        _ => 0.0,
    }
}

/// Decode string bytes without a font encoding: UTF-16BE behind a byte
/// order mark, one byte per character otherwise
fn decode_raw(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units = rest.chunks_exact(2).map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
            char::decode_utf16(units)
                .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect()
        }
        _ => bytes.iter().copied().map(char::from).collect(),
    }
}
