use serde::{Deserialize, Serialize};

use crate::frame::format_numeric;
use crate::table::{CleanTable, Column, RowIndex};

/// A single cell as it arrived from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawValue {
    Null,
    Text(String),
    Number(f64),
}

static NULL_CELL: RawValue = RawValue::Null;

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Renders the cell as text; `Null` becomes an empty string.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(value) => value.clone(),
            Self::Number(value) => format_numeric(*value),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Unprocessed table: header labels plus row-major cells.
///
/// Labels may repeat and may be loader placeholders such as `Unnamed: 3`.
/// Rows shorter than the header read as `Null` past their end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawValue>>) -> Self {
        Self { headers, rows }
    }

    /// Table with no header and no rows; what a loader hands over for a
    /// missing or unreadable source.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from column-major text data. Empty strings become `Null`.
    pub fn from_text_columns(columns: &[(&str, Vec<&str>)]) -> Self {
        let headers = columns.iter().map(|(name, _)| (*name).to_string()).collect();
        let row_count = columns
            .iter()
            .map(|(_, values)| values.len())
            .max()
            .unwrap_or(0);
        let rows = (0..row_count)
            .map(|row| {
                columns
                    .iter()
                    .map(|(_, values)| match values.get(row) {
                        Some(value) if !value.is_empty() => RawValue::from(*value),
                        _ => RawValue::Null,
                    })
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when there is nothing to normalize: no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> &RawValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&NULL_CELL)
    }

    /// Iterates the cells of one column, top to bottom.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &RawValue> + '_ {
        (0..self.rows.len()).map(move |row| self.cell(row, column))
    }

    /// A column is text-typed when any of its cells holds text.
    pub fn is_text_column(&self, column: usize) -> bool {
        self.column_values(column).any(RawValue::is_text)
    }
}

/// Label used for a derived row index when a clean table is written back out as raw input.
const INDEX_LABEL: &str = "index";

/// Placeholder written when a clean table has rows but no columns.
const PLACEHOLDER_LABEL: &str = "Unnamed: 0";

impl From<&CleanTable> for RawTable {
    /// Re-emits a clean table as raw input.
    ///
    /// A derived row index is written as a leading `index` column; a
    /// sequential index is implied by row order. Normalizing the result
    /// again reproduces the same table.
    fn from(table: &CleanTable) -> Self {
        if table.row_count() == 0 {
            return Self::empty();
        }
        let derived = match table.index() {
            RowIndex::Derived(labels) => Some(labels),
            RowIndex::Sequential { .. } => None,
        };
        let mut headers = Vec::with_capacity(table.column_count() + 1);
        if derived.is_some() {
            headers.push(INDEX_LABEL.to_string());
        }
        headers.extend(table.labels().map(str::to_string));
        if headers.is_empty() {
            headers.push(PLACEHOLDER_LABEL.to_string());
        }

        let rows = (0..table.row_count())
            .map(|row| {
                let mut cells = Vec::with_capacity(headers.len());
                if let Some(labels) = derived {
                    cells.push(RawValue::Number(labels[row] as f64));
                }
                for (_, column) in table.columns() {
                    cells.push(match column {
                        Column::Numeric(values) => RawValue::from(values[row]),
                        Column::Text(values) => values[row]
                            .as_deref()
                            .map_or(RawValue::Null, RawValue::from),
                    });
                }
                cells
            })
            .collect();
        Self { headers, rows }
    }
}
