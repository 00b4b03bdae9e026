use crate::model::RawCell;

/// Canonical text for one extracted cell: absent becomes `""`, anything else is trimmed.
#[must_use]
pub fn normalize_cell(cell: &RawCell) -> String {
    match cell {
        RawCell::Absent => String::new(),
        RawCell::Text(value) => value.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}
