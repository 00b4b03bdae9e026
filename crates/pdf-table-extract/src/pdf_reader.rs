//! Text-layout PDF backend built on `lopdf` and `pdf-extract`.
//!
//! Page text is chosen among several extractors by how table-friendly it
//! looks; tables are then recovered from column alignment in that text. No
//! native libraries are involved, so the backend also runs under wasm32,
//! where only the `lopdf` text candidates are available.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use crate::engine::{PdfEngine, PdfPage};
use crate::error::EngineError;
use crate::model::RawTable;
use crate::table_detect::detect_grids;
use crate::table_parse::{soft_split_line_into_cells, split_line_into_cells};
use crate::text_decode::{decode_pdf_bytes, looks_decoding_broken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionOptions {
    /// Minimum cells a line needs to count as a table row.
    pub min_cols: usize,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self { min_cols: 2 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LopdfEngine {
    options: DetectionOptions,
}

impl LopdfEngine {
    pub fn new(options: DetectionOptions) -> Result<Self, EngineError> {
        if options.min_cols < 2 {
            return Err(EngineError::PdfExtract(
                "min_cols must be at least 2".to_string(),
            ));
        }
        Ok(Self { options })
    }
}

/// A page whose text was resolved at open time. Tables are detected on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPage {
    page_number: u32,
    text: Option<String>,
    min_cols: usize,
}

impl PdfPage for TextPage {
    fn extract_text(&self) -> Result<Option<String>, EngineError> {
        Ok(self.text.clone())
    }

    fn extract_tables(&self) -> Result<Option<Vec<RawTable>>, EngineError> {
        Ok(self
            .text
            .as_deref()
            .map(|text| detect_grids(self.page_number, text, self.min_cols)))
    }
}

impl PdfEngine for LopdfEngine {
    type Page = TextPage;

    fn open(&self, bytes: &[u8]) -> Result<Vec<TextPage>, EngineError> {
        let document = Document::load_mem(bytes)?;
        let pages_map = document.get_pages();
        let layout_pages = if pages_map.is_empty() {
            None
        } else {
            pdf_extract_pages(bytes, pages_map.len())
        };

        let pages = pages_map
            .iter()
            .enumerate()
            .map(|(index, (page_number, page_id))| {
                let layout_text = layout_pages
                    .as_ref()
                    .and_then(|texts| texts.get(index))
                    .map(String::as_str);
                TextPage {
                    page_number: *page_number,
                    text: page_text(&document, *page_number, *page_id, layout_text),
                    min_cols: self.options.min_cols,
                }
            })
            .collect();

        Ok(pages)
    }
}

/// Picks the best of the available text candidates for one page.
fn page_text(
    document: &Document,
    page_number: u32,
    page_id: ObjectId,
    layout_text: Option<&str>,
) -> Option<String> {
    let mut candidates = Vec::new();
    if let Some(text) = layout_text.filter(|text| !text.trim().is_empty()) {
        candidates.push(text.to_string());
    }
    if let Some(text) = content_stream_text(document, page_id) {
        candidates.push(text);
    }
    if let Some(text) = document
        .extract_text(&[page_number])
        .ok()
        .filter(|text| !text.trim().is_empty())
    {
        candidates.push(text);
    }

    debug!(
        page = page_number,
        candidates = candidates.len(),
        "resolved page text candidates"
    );
    choose_best_text(candidates)
}

/// Per-page text from `pdf-extract`, or `None` when it fails or disagrees on the page count.
///
/// `pdf-extract` can panic on malformed input. wasm32 aborts on panic, so the
/// worker build relies on the lopdf candidates alone.
#[cfg(not(target_arch = "wasm32"))]
fn pdf_extract_pages(bytes: &[u8], expected: usize) -> Option<Vec<String>> {
    use std::panic::{self, AssertUnwindSafe};

    use tracing::warn;

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    let text = match result {
        Ok(Ok(text)) => text,
        Ok(Err(error)) => {
            warn!("pdf-extract failed, falling back to content streams: {error}");
            return None;
        }
        Err(_) => {
            warn!("pdf-extract panicked on malformed input, falling back to content streams");
            return None;
        }
    };

    let pages = split_text_into_pages(&text);
    if pages.len() == expected {
        Some(pages)
    } else {
        debug!(
            found = pages.len(),
            expected, "pdf-extract page split does not match page tree"
        );
        None
    }
}

#[cfg(target_arch = "wasm32")]
fn pdf_extract_pages(_bytes: &[u8], _expected: usize) -> Option<Vec<String>> {
    None
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}

/// Favors text that splits into columns; heavily penalizes mis-decoded text.
fn extraction_quality_score(text: &str) -> i64 {
    let mut lines = 0_i64;
    let mut multi_cell_lines = 0_i64;
    let mut numeric_lines = 0_i64;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        lines += 1;
        if split_line_into_cells(line).len() >= 2 || soft_split_line_into_cells(line).len() >= 3 {
            multi_cell_lines += 1;
        }
        if line.chars().any(|ch| ch.is_ascii_digit()) {
            numeric_lines += 1;
        }
    }

    if lines == 0 {
        return i64::MIN / 4;
    }

    let broken_penalty = if looks_decoding_broken(text) { 800 } else { 0 };
    multi_cell_lines * 50 + numeric_lines * 15 + lines - broken_penalty
}

fn choose_best_text(candidates: Vec<String>) -> Option<String> {
    candidates
        .into_iter()
        .max_by_key(|text| extraction_quality_score(text))
}

/// Rebuilds page lines from text-showing operators, honoring each font's encoding.
fn content_stream_text(document: &Document, page_id: ObjectId) -> Option<String> {
    fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => text.push_str(&decode_pdf_bytes(encoding, bytes)),
                Object::Array(items) => {
                    collect_text(text, encoding, items);
                    text.push(' ');
                }
                // Large negative kerning in a TJ array is a visual gap.
                Object::Integer(value) if *value < -100 => text.push(' '),
                _ => {}
            }
        }
    }

    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut encoding = None;
    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                encoding = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                    .and_then(|name| encodings.get(name).copied());
            }
            "Tj" | "TJ" | "'" | "\"" => collect_text(&mut current, encoding, &operation.operands),
            "T*" | "Td" | "TD" | "ET" if !current.trim().is_empty() => {
                lines.push(std::mem::take(&mut current));
            }
            _ => {}
        }
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    use super::{
        DetectionOptions, LopdfEngine, choose_best_text, extraction_quality_score, page_text,
        split_text_into_pages,
    };
    use crate::engine::PdfEngine;
    use crate::error::EngineError;

    fn single_page_document(lines: &[&str]) -> (Document, lopdf::ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut operations = vec![Operation::new("BT", vec![])];
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                operations.push(Operation::new("T*", vec![]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        }
        operations.push(Operation::new("ET", vec![]));
        let content = Content { operations }.encode().expect("encode content");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        (doc, page_id)
    }

    #[test]
    fn splits_form_feed_delimited_pages() {
        let pages = split_text_into_pages("p1\u{000C}p2\u{000C}");
        assert_eq!(pages, vec!["p1", "p2"]);
    }

    #[test]
    fn prefers_columnar_text() {
        let columnar = "Item  Qty\nPen  3".to_string();
        let flat = "Item Qty Pen 3".to_string();
        assert!(extraction_quality_score(&columnar) > extraction_quality_score(&flat));
        assert_eq!(
            choose_best_text(vec![flat, columnar.clone()]),
            Some(columnar)
        );
        assert_eq!(choose_best_text(Vec::new()), None);
    }

    #[test]
    fn rejects_too_small_min_cols() {
        let error = LopdfEngine::new(DetectionOptions { min_cols: 1 }).expect_err("must reject");
        assert!(error.to_string().contains("min_cols"));
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let error = LopdfEngine::default()
            .open(b"definitely not a pdf")
            .expect_err("garbage must not parse");
        assert!(matches!(error, EngineError::PdfLoad(_)));
    }

    #[test]
    fn page_text_resolves_without_layout_text() {
        let (doc, page_id) = single_page_document(&["Item  Qty", "Pen  3"]);

        let text = page_text(&doc, 1, page_id, None).expect("content stream text");
        assert!(text.contains("Item"));
        assert!(text.contains("Pen"));
    }

    #[test]
    fn blank_layout_text_is_not_a_candidate() {
        let (doc, page_id) = single_page_document(&["Item  Qty", "Pen  3"]);

        let text = page_text(&doc, 1, page_id, Some("  \n ")).expect("content stream text");
        assert!(text.contains("Pen"));
    }
}
