//! Per-page table normalization and keyword-based document classification
//! for uploaded PDFs.
//!
//! The PDF engine is a capability ([`PdfEngine`] / [`PdfPage`]); [`LopdfEngine`]
//! is the bundled text-layout backend.

mod assemble;
mod cell;
mod classify;
mod engine;
mod error;
mod extract;
mod model;
mod page;
mod pdf_reader;
mod table_detect;
mod table_parse;
mod text_decode;

pub use assemble::assemble_table;
pub use cell::normalize_cell;
pub use classify::classify_document;
pub use engine::{PdfEngine, PdfPage};
pub use error::{EngineError, ExtractError};
pub use extract::{
    ACCEPTED_MEDIA_TYPES, Upload, extract_document, extract_document_at, validate_upload,
};
pub use model::{
    DocumentType, ExtractionReport, NormalizedTable, PageSummary, RawCell, RawRow, RawTable,
};
pub use page::{ProcessedPage, process_page};
pub use pdf_reader::{DetectionOptions, LopdfEngine, TextPage};
