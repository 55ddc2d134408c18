use std::fmt;

use serde::{Deserialize, Serialize};

use crate::frame::format_numeric;

/// Storage type of a cleaned column, fixed at normalization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Cell values of one cleaned column. A column is never mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Text(_) => ColumnKind::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn non_null_count(&self) -> usize {
        match self {
            Self::Numeric(values) => values.iter().filter(|v| v.is_some()).count(),
            Self::Text(values) => values.iter().filter(|v| v.is_some()).count(),
        }
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match self {
            Self::Numeric(values) => Some(values),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match self {
            Self::Numeric(_) => None,
            Self::Text(values) => Some(values),
        }
    }

    /// Display form of one cell; nulls render as an empty string.
    pub fn display_value(&self, row: usize) -> String {
        match self {
            Self::Numeric(values) => values
                .get(row)
                .copied()
                .flatten()
                .map(format_numeric)
                .unwrap_or_default(),
            Self::Text(values) => values
                .get(row)
                .and_then(Clone::clone)
                .unwrap_or_default(),
        }
    }

    fn truncated(&self, len: usize) -> Self {
        match self {
            Self::Numeric(values) => Self::Numeric(values.iter().take(len).copied().collect()),
            Self::Text(values) => Self::Text(values.iter().take(len).cloned().collect()),
        }
    }
}

/// Row identity of a cleaned table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "labels", rename_all = "snake_case")]
pub enum RowIndex {
    /// Rows labelled `1..=len`.
    Sequential { len: usize },
    /// Distinct integer labels taken from an index-like source column, in row order.
    Derived(Vec<i64>),
}

impl Default for RowIndex {
    fn default() -> Self {
        Self::Sequential { len: 0 }
    }
}

impl RowIndex {
    pub fn sequential(len: usize) -> Self {
        Self::Sequential { len }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Sequential { len } => *len,
            Self::Derived(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Derived(_))
    }

    /// Label of the row at `position`, if it exists.
    pub fn label(&self, position: usize) -> Option<i64> {
        match self {
            Self::Sequential { len } if position < *len => i64::try_from(position + 1).ok(),
            Self::Sequential { .. } => None,
            Self::Derived(labels) => labels.get(position).copied(),
        }
    }

    /// Row labels in row order.
    pub fn labels(&self) -> Vec<i64> {
        (0..self.len()).filter_map(|position| self.label(position)).collect()
    }

    fn truncated(&self, len: usize) -> Self {
        match self {
            Self::Sequential { len: current } => Self::Sequential {
                len: (*current).min(len),
            },
            Self::Derived(labels) => Self::Derived(labels.iter().take(len).copied().collect()),
        }
    }
}

/// A column label paired with its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledColumn {
    pub label: String,
    pub data: Column,
}

/// Normalized, typed table.
///
/// Immutable once built. Labels keep their left-to-right order and may repeat;
/// lookups by label return the first match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanTable {
    columns: Vec<LabeledColumn>,
    index: RowIndex,
}

impl CleanTable {
    /// Builds a table from labelled columns and a row index.
    ///
    /// # Panics
    ///
    /// Panics if a column length differs from the index length.
    pub fn new(columns: Vec<(String, Column)>, index: RowIndex) -> Self {
        for (label, column) in &columns {
            assert_eq!(
                column.len(),
                index.len(),
                "column '{label}' length does not match the row index"
            );
        }
        let columns = columns
            .into_iter()
            .map(|(label, data)| LabeledColumn { label, data })
            .collect();
        Self { columns, index }
    }

    /// Zero rows, zero columns: the "no data" table.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when there are no rows or no columns to show.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.columns.is_empty()
    }

    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.label.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> + '_ {
        self.columns.iter().map(|c| (c.label.as_str(), &c.data))
    }

    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.label == label)
            .map(|c| &c.data)
    }

    pub fn kind_of(&self, label: &str) -> Option<ColumnKind> {
        self.column(label).map(Column::kind)
    }

    pub fn is_numeric(&self, label: &str) -> bool {
        self.kind_of(label) == Some(ColumnKind::Numeric)
    }

    pub fn numeric_labels(&self) -> Vec<&str> {
        self.labels_of_kind(ColumnKind::Numeric)
    }

    pub fn text_labels(&self) -> Vec<&str> {
        self.labels_of_kind(ColumnKind::Text)
    }

    fn labels_of_kind(&self, kind: ColumnKind) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.data.kind() == kind)
            .map(|c| c.label.as_str())
            .collect()
    }

    /// First `n` rows, keeping their index labels.
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|c| LabeledColumn {
                    label: c.label.clone(),
                    data: c.data.truncated(n),
                })
                .collect(),
            index: self.index.truncated(n),
        }
    }
}
