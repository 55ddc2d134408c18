//! The normalization pipeline over a whole raw table.

use nibrs_model::{CleanTable, Column, RawTable, RawValue, RowIndex};
use tracing::debug;

use crate::header::{clean_header, is_unnamed};
use crate::index::{derive_row_index, find_index_column};
use crate::numeric::coerce_column;

/// Normalizes a raw table.
///
/// Never fails: a raw table without rows or columns yields an empty
/// [`CleanTable`], unparseable cells become nulls and a rejected index column
/// falls back to sequential labels. The input is only read.
pub fn normalize_table(raw: &RawTable) -> CleanTable {
    if raw.is_empty() {
        debug!(
            rows = raw.row_count(),
            columns = raw.column_count(),
            "empty raw table"
        );
        return CleanTable::empty();
    }

    let mut columns: Vec<(String, Column)> = Vec::with_capacity(raw.column_count());
    for (position, header) in raw.headers.iter().enumerate() {
        let label = clean_header(header);
        if is_unnamed(&label) {
            debug!(column = %label, "dropping placeholder column");
            continue;
        }
        let column = build_column(raw, position);
        debug!(column = %label, kind = %column.kind(), "column typed");
        columns.push((label, column));
    }

    let index = match take_row_index(&mut columns) {
        Some(labels) => RowIndex::Derived(labels),
        None => RowIndex::sequential(raw.row_count()),
    };
    CleanTable::new(columns, index)
}

/// Types one raw column. Columns without any text cell are numeric already.
fn build_column(raw: &RawTable, position: usize) -> Column {
    if !raw.is_text_column(position) {
        return Column::Numeric(
            raw.column_values(position)
                .map(|cell| match cell {
                    RawValue::Number(value) if value.is_finite() => Some(*value),
                    _ => None,
                })
                .collect(),
        );
    }

    match coerce_column(raw.column_values(position)) {
        Some(values) => Column::Numeric(values),
        None => Column::Text(
            raw.column_values(position)
                .map(|cell| match cell {
                    RawValue::Null => None,
                    other => Some(other.to_text()),
                })
                .collect(),
        ),
    }
}

/// Removes the first index-like column and returns its labels when it qualifies.
fn take_row_index(columns: &mut Vec<(String, Column)>) -> Option<Vec<i64>> {
    let position = find_index_column(columns.iter().map(|(label, _)| label.as_str()))?;
    let (label, column) = &columns[position];
    match derive_row_index(column) {
        Ok(labels) => {
            debug!(column = %label, "using column as row index");
            columns.remove(position);
            Some(labels)
        }
        Err(reason) => {
            debug!(column = %label, %reason, "index-like column rejected");
            None
        }
    }
}
