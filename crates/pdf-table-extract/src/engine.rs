use crate::error::EngineError;
use crate::model::RawTable;

/// A single page handed out by a [`PdfEngine`].
///
/// `Ok(None)` means the engine had nothing for the page; it is not a failure.
pub trait PdfPage {
    fn extract_text(&self) -> Result<Option<String>, EngineError>;

    fn extract_tables(&self) -> Result<Option<Vec<RawTable>>, EngineError>;
}

/// Turns raw document bytes into an ordered page sequence.
pub trait PdfEngine {
    type Page: PdfPage;

    fn open(&self, bytes: &[u8]) -> Result<Vec<Self::Page>, EngineError>;
}

