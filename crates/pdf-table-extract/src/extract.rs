use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use crate::classify::classify_document;
use crate::engine::PdfEngine;
use crate::error::ExtractError;
use crate::model::ExtractionReport;
use crate::page::process_page;

pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = ["application/pdf", "application/octet-stream"];

/// One uploaded document as received from the transport.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub bytes: &'a [u8],
    pub media_type: &'a str,
    pub file_name: Option<&'a str>,
}

/// Rejects uploads before any parsing is attempted.
pub fn validate_upload(bytes: &[u8], media_type: &str) -> Result<(), ExtractError> {
    if !ACCEPTED_MEDIA_TYPES.contains(&media_type) {
        return Err(ExtractError::InvalidMediaType(media_type.to_string()));
    }
    if bytes.is_empty() {
        return Err(ExtractError::EmptyPayload);
    }
    Ok(())
}

pub fn extract_document<E>(engine: &E, upload: Upload<'_>) -> Result<ExtractionReport, ExtractError>
where
    E: PdfEngine + ?Sized,
{
    extract_document_at(engine, upload, Utc::now())
}

/// Same as [`extract_document`] with the report timestamp supplied by the caller.
pub fn extract_document_at<E>(
    engine: &E,
    upload: Upload<'_>,
    now: DateTime<Utc>,
) -> Result<ExtractionReport, ExtractError>
where
    E: PdfEngine + ?Sized,
{
    validate_upload(upload.bytes, upload.media_type)?;

    let pages = engine.open(upload.bytes)?;

    let mut summaries = Vec::with_capacity(pages.len());
    let mut texts = Vec::with_capacity(pages.len());
    for (page_number, page) in (1_u32..).zip(&pages) {
        let processed = process_page(page_number, page)?;
        summaries.push(processed.summary);
        texts.push(processed.text);
    }

    let document_type = classify_document(&texts.join("\n"));
    let table_count = summaries.iter().map(|page| page.table_count).sum();

    info!(
        file_name = upload.file_name.unwrap_or_default(),
        pages = summaries.len(),
        tables = table_count,
        %document_type,
        "extraction completed"
    );

    Ok(ExtractionReport {
        file_name: upload.file_name.map(str::to_string),
        extracted_at: now.to_rfc3339_opts(SecondsFormat::Micros, false),
        document_type,
        page_count: summaries.len(),
        table_count,
        pages: summaries,
    })
}
