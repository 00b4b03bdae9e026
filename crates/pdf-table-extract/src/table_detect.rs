use tracing::debug;

use crate::model::RawTable;
use crate::table_parse::{pad_rows, soft_split_line_into_cells, split_line_into_cells};

fn looks_like_sentence(line: &str) -> bool {
    ['.', '!', '?']
        .iter()
        .any(|punctuation| line.trim_end().ends_with(*punctuation))
}

/// Cells for one line, or `None` when the line does not read as a table row.
fn line_cells(line: &str, min_cols: usize) -> Option<Vec<String>> {
    let cells = split_line_into_cells(line);
    if cells.len() >= min_cols {
        return Some(cells);
    }

    let soft_cells = soft_split_line_into_cells(line);
    let has_numeric = soft_cells
        .iter()
        .any(|cell| cell.chars().any(|ch| ch.is_ascii_digit()));
    let tabular = soft_cells.len() >= min_cols
        && !looks_like_sentence(line)
        && (has_numeric || soft_cells.len() <= 6);

    tabular.then_some(soft_cells)
}

fn finish_grid(page_number: u32, rows: &mut Vec<Vec<String>>, grids: &mut Vec<RawTable>) {
    if rows.len() < 2 {
        rows.clear();
        return;
    }

    let rows = std::mem::take(rows);
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    debug!(
        page = page_number,
        rows = rows.len(),
        width,
        "detected table grid"
    );
    grids.push(pad_rows(rows, width));
}

/// Raw grids for one page of text: runs of two or more consecutive table-like lines.
pub(crate) fn detect_grids(page_number: u32, text: &str, min_cols: usize) -> Vec<RawTable> {
    let mut grids = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        match line_cells(line, min_cols) {
            Some(cells) => current.push(cells),
            None => finish_grid(page_number, &mut current, &mut grids),
        }
    }

    finish_grid(page_number, &mut current, &mut grids);
    grids
}
