use thiserror::Error;

/// Failures raised by a [`crate::PdfEngine`] backend while opening or walking a document.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] lopdf::Error),

    #[error("failed to extract PDF content: {0}")]
    PdfExtract(String),
}

/// Request-level failures. Every variant is a client error; none yields a partial report.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Please upload a PDF file.")]
    InvalidMediaType(String),

    #[error("Uploaded file is empty.")]
    EmptyPayload,

    #[error("Could not parse PDF: {0}")]
    ParseFailure(String),
}

impl From<EngineError> for ExtractError {
    fn from(error: EngineError) -> Self {
        Self::ParseFailure(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineError, ExtractError};

    #[test]
    fn engine_errors_become_parse_failures_with_reason() {
        let error = ExtractError::from(EngineError::PdfExtract("no pages".to_string()));
        assert_eq!(
            error.to_string(),
            "Could not parse PDF: failed to extract PDF content: no pages"
        );
    }

    #[test]
    fn validation_messages_match_http_detail() {
        assert_eq!(
            ExtractError::InvalidMediaType("text/plain".to_string()).to_string(),
            "Please upload a PDF file."
        );
        assert_eq!(
            ExtractError::EmptyPayload.to_string(),
            "Uploaded file is empty."
        );
    }
}
