use tracing::debug;

use crate::assemble::assemble_table;
use crate::engine::PdfPage;
use crate::error::EngineError;
use crate::model::PageSummary;

/// Summary of one page plus the text it contributed to classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedPage {
    pub summary: PageSummary,
    pub text: String,
}

/// Normalizes every raw table on `page`.
///
/// Missing text or tables degrade to empty values. Engine errors are returned
/// as-is so the caller can fail the whole document.
pub fn process_page<P>(page_number: u32, page: &P) -> Result<ProcessedPage, EngineError>
where
    P: PdfPage + ?Sized,
{
    let text = page.extract_text()?.unwrap_or_default();
    let raw_tables = page.extract_tables()?.unwrap_or_default();

    let mut tables = Vec::new();
    for raw in &raw_tables {
        match assemble_table(raw, tables.len() + 1) {
            Some(table) => tables.push(table),
            None => debug!(page = page_number, "dropping table with no non-empty rows"),
        }
    }

    debug!(
        page = page_number,
        raw_tables = raw_tables.len(),
        tables = tables.len(),
        "processed page"
    );

    Ok(ProcessedPage {
        summary: PageSummary {
            page_number,
            table_count: tables.len(),
            tables,
        },
        text,
    })
}
