use crate::cell::normalize_cell;
use crate::model::{NormalizedTable, RawTable};

/// Cleans every non-empty row of `raw`, keeping cell order and count.
fn clean_rows(raw: &RawTable) -> Vec<Vec<String>> {
    raw.iter()
        .filter_map(|row| row.as_deref().filter(|cells| !cells.is_empty()))
        .map(|cells| cells.iter().map(normalize_cell).collect())
        .collect()
}

/// Splits a raw grid into header and data rows.
///
/// Returns `None` when no row survives filtering. A single surviving row still
/// yields a table, with that row as `headers` and no data rows.
#[must_use]
pub fn assemble_table(raw: &RawTable, table_index: usize) -> Option<NormalizedTable> {
    let mut cleaned = clean_rows(raw).into_iter();
    let headers = cleaned.next()?;
    let rows = cleaned.collect::<Vec<_>>();

    Some(NormalizedTable {
        table_index,
        column_count: headers.len(),
        row_count: rows.len(),
        headers,
        rows,
    })
}
