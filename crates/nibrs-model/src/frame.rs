//! Polars interop and numeric display helpers.
//!
//! Charting consumers work on polars frames; this module turns a
//! [`CleanTable`] into one without changing any value.

use polars::prelude::*;

use crate::table::{CleanTable, Column as CleanColumn};

/// Formats a floating-point number as a string without trailing zeros after decimal.
///
/// Only trims trailing zeros if the number contains a decimal point.
/// Integer-valued floats like 40.0 are formatted as "40", not "4".
///
/// # Examples
///
/// ```
/// use nibrs_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(40.0), "40");
/// assert_eq!(format_numeric(1234.0), "1234");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

impl CleanTable {
    /// Converts the table into a polars `DataFrame`.
    ///
    /// Numeric columns become `Float64`, text columns `String`. When
    /// `index_name` is given, the row index is prepended as an `Int64` column.
    ///
    /// # Errors
    ///
    /// Polars rejects duplicate column names, so a table whose cleaned labels
    /// collide (or collide with `index_name`) cannot be converted.
    pub fn to_dataframe(&self, index_name: Option<&str>) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.column_count() + 1);
        if let Some(name) = index_name {
            columns.push(Series::new(name.into(), self.index().labels()).into_column());
        }
        for (label, data) in self.columns() {
            let series = match data {
                CleanColumn::Numeric(values) => Series::new(label.into(), values.as_slice()),
                CleanColumn::Text(values) => Series::new(label.into(), values.as_slice()),
            };
            columns.push(series.into_column());
        }
        DataFrame::new(columns)
    }
}
