use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// One grid position as produced by a PDF engine.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Absent,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Display for RawCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T> From<Option<T>> for RawCell
where
    T: Into<RawCell>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// `None` and `Some(vec![])` both mean "skip this row".
pub type RawRow = Option<Vec<RawCell>>;

pub type RawTable = Vec<RawRow>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub table_index: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub column_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub page_number: u32,
    pub table_count: usize,
    pub tables: Vec<NormalizedTable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Invoice,
    Receipt,
    Report,
    Unknown,
}

impl DocumentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Receipt => "receipt",
            Self::Report => "report",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub file_name: Option<String>,
    pub extracted_at: String,
    pub document_type: DocumentType,
    pub page_count: usize,
    pub table_count: usize,
    pub pages: Vec<PageSummary>,
}
