use crate::model::DocumentType;

const INVOICE_KEYWORDS: &[&str] = &["invoice", "bill to", "invoice #", "due date"];
const RECEIPT_KEYWORDS: &[&str] = &["receipt", "subtotal", "cash", "change"];
const REPORT_KEYWORDS: &[&str] = &["report", "summary", "quarter", "kpi", "statement"];

/// Rules are checked in order and the first hit wins.
const RULES: &[(DocumentType, &[&str])] = &[
    (DocumentType::Invoice, INVOICE_KEYWORDS),
    (DocumentType::Receipt, RECEIPT_KEYWORDS),
    (DocumentType::Report, REPORT_KEYWORDS),
];

/// Guesses the document type from case-insensitive substring matches.
///
/// Matching is not word-boundary aware: "reporting" counts as "report".
#[must_use]
pub fn classify_document(text: &str) -> DocumentType {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map_or(DocumentType::Unknown, |(document_type, _)| *document_type)
}
