//! Row index detection from index-like columns.

use std::collections::HashSet;
use std::sync::LazyLock;

use nibrs_model::Column;
use regex::Regex;
use thiserror::Error;

/// Labels that suggest a column carries row identity.
static INDEX_LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(unnamed: 0|index|row|#|no\.?$|s no$|sr\.?n$|sr no$|id$)")
        .expect("Invalid index label regex")
});

/// Why an index-like column was not adopted as the row index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexRejection {
    #[error("row {row} has no numeric value")]
    Unparseable { row: usize },

    #[error("row {row} is not a whole number")]
    NotWhole { row: usize },

    #[error("label {label} appears more than once")]
    Duplicate { label: i64 },
}

/// Returns true when a label looks like a row-identity column.
pub fn is_index_like(label: &str) -> bool {
    INDEX_LABEL_PATTERN.is_match(label.trim())
}

/// Position of the first index-like label, left to right.
pub fn find_index_column<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<usize> {
    labels.into_iter().position(is_index_like)
}

fn index_value(cell: &str) -> Option<f64> {
    let stripped: String = cell
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
        .collect();
    if stripped.is_empty() {
        return None;
    }
    stripped.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn whole_number(value: f64) -> Option<i64> {
    if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Derives row labels from a candidate column.
///
/// Every row must hold a number, every number must be whole and all of them
/// must be distinct; the labels keep row order. Any failure rejects the
/// column as a whole.
pub fn derive_row_index(column: &Column) -> Result<Vec<i64>, IndexRejection> {
    let values: Vec<Option<f64>> = match column {
        Column::Numeric(values) => values.clone(),
        Column::Text(values) => values
            .iter()
            .map(|cell| cell.as_deref().and_then(index_value))
            .collect(),
    };

    let mut labels = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        let value = value.ok_or(IndexRejection::Unparseable { row })?;
        let label = whole_number(value).ok_or(IndexRejection::NotWhole { row })?;
        labels.push(label);
    }

    let mut seen = HashSet::with_capacity(labels.len());
    for label in &labels {
        if !seen.insert(*label) {
            return Err(IndexRejection::Duplicate { label: *label });
        }
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[&str]) -> Column {
        Column::Text(values.iter().map(|v| Some((*v).to_string())).collect())
    }

    #[test]
    fn test_index_like_labels() {
        for label in ["Index", "row", "ROW LABELS", "#", "No", "no.", "S No", "Sr.N", "SrN", "sr no", "ID", " id "] {
            assert!(is_index_like(label), "{label} should be index-like");
        }
    }

    #[test]
    fn test_non_index_labels() {
        for label in ["Identity Theft", "None", "Number", "State", "Sr No 2", "Agency ID", "no. of"] {
            assert!(!is_index_like(label), "{label} should not be index-like");
        }
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(find_index_column(["State", "ID", "Row"]), Some(1));
        assert_eq!(find_index_column(["State", "Agency Type"]), None);
    }

    #[test]
    fn test_derive_keeps_row_order() {
        let column = Column::Numeric(vec![Some(3.0), Some(1.0), Some(2.0)]);
        assert_eq!(derive_row_index(&column), Ok(vec![3, 1, 2]));
    }

    #[test]
    fn test_derive_from_text() {
        assert_eq!(derive_row_index(&text(&["#1", "#2", "+3"])), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_rejects_missing_values() {
        let column = Column::Numeric(vec![Some(1.0), None]);
        assert_eq!(
            derive_row_index(&column),
            Err(IndexRejection::Unparseable { row: 1 })
        );
        assert_eq!(
            derive_row_index(&text(&["1", "a"])),
            Err(IndexRejection::Unparseable { row: 1 })
        );
    }

    #[test]
    fn test_rejects_fractions() {
        let column = Column::Numeric(vec![Some(1.0), Some(1.5)]);
        assert_eq!(
            derive_row_index(&column),
            Err(IndexRejection::NotWhole { row: 1 })
        );
    }

    #[test]
    fn test_rejects_duplicates() {
        let column = Column::Numeric(vec![Some(1.0), Some(2.0), Some(1.0)]);
        assert_eq!(
            derive_row_index(&column),
            Err(IndexRejection::Duplicate { label: 1 })
        );
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            IndexRejection::NotWhole { row: 4 }.to_string(),
            "row 4 is not a whole number"
        );
    }
}
