use crate::model::{RawCell, RawTable};

/// Splits a layout line on tabs or runs of two or more whitespace characters.
pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut gap = 0_usize;

    for ch in line.trim().chars() {
        if ch == '\t' {
            flush_cell(&mut cells, &mut current);
            gap = 0;
        } else if ch.is_whitespace() {
            gap += 1;
            if gap == 1 {
                current.push(' ');
            } else {
                flush_cell(&mut cells, &mut current);
            }
        } else {
            gap = 0;
            current.push(ch);
        }
    }

    flush_cell(&mut cells, &mut current);
    cells
}

fn flush_cell(cells: &mut Vec<String>, current: &mut String) {
    let cell = current.trim();
    if !cell.is_empty() {
        cells.push(cell.to_string());
    }
    current.clear();
}

pub(crate) fn soft_split_line_into_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Pads every row to `width` with absent cells.
pub(crate) fn pad_rows(rows: Vec<Vec<String>>, width: usize) -> RawTable {
    rows.into_iter()
        .map(|row| {
            let mut cells = row.into_iter().map(RawCell::Text).collect::<Vec<_>>();
            cells.resize(width, RawCell::Absent);
            Some(cells)
        })
        .collect()
}
