//! Column-level numeric coercion.
//!
//! A text column is either converted entirely to numbers or left alone; cells
//! are never typed one by one.

use std::sync::LazyLock;

use nibrs_model::RawValue;
use regex::Regex;

/// Share of non-empty cells that must look numeric for a column to be coerced.
pub const NUMERIC_RATIO_THRESHOLD: f64 = 0.5;

/// A signed integer or decimal, no exponent.
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("Invalid number regex"));

/// A cell with thousands separators and surrounding whitespace removed.
///
/// Emptiness is judged on this form: a cell such as `Alabama` is non-empty
/// even though none of its characters can take part in a number.
pub fn cleaned_cell(cell: &str) -> String {
    cell.replace(',', "").trim().to_string()
}

/// Reduces a cell to the characters that can take part in a number.
///
/// The cell is cleaned first, then everything except ASCII digits, `.` and
/// `-` is dropped. Every `-` is kept, so a range like `5-10` stays
/// recognisably non-numeric.
pub fn match_value(cell: &str) -> String {
    cleaned_cell(cell)
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect()
}

/// Parses a match value; empty or malformed values yield `None`.
pub fn parse_match_value(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Counts used for the coercion decision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NumericProfile {
    /// Cells whose cleaned text is non-empty.
    pub non_empty: usize,
    /// Non-empty cells whose match value has the shape of a number.
    pub matching: usize,
}

impl NumericProfile {
    /// Profiles raw cell texts.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut profile = Self::default();
        for cell in cells {
            if cleaned_cell(cell).is_empty() {
                continue;
            }
            profile.non_empty += 1;
            if NUMBER_PATTERN.is_match(&match_value(cell)) {
                profile.matching += 1;
            }
        }
        profile
    }

    /// Fraction of non-empty cells matching the number pattern, if any are non-empty.
    pub fn ratio(self) -> Option<f64> {
        if self.non_empty == 0 {
            None
        } else {
            Some(self.matching as f64 / self.non_empty as f64)
        }
    }

    pub fn all_match(self) -> bool {
        self.non_empty > 0 && self.matching == self.non_empty
    }

    pub fn should_coerce(self) -> bool {
        match self.ratio() {
            Some(ratio) => ratio >= NUMERIC_RATIO_THRESHOLD || self.all_match(),
            None => false,
        }
    }
}

/// Coerces a text-typed column.
///
/// Returns the numeric values when the column qualifies, `None` when it should
/// stay text. Non-empty cells whose match value does not parse become nulls.
pub fn coerce_column<'a>(cells: impl IntoIterator<Item = &'a RawValue>) -> Option<Vec<Option<f64>>> {
    let texts: Vec<String> = cells.into_iter().map(RawValue::to_text).collect();

    let profile = NumericProfile::from_cells(texts.iter().map(String::as_str));
    if !profile.should_coerce() {
        tracing::trace!(
            non_empty = profile.non_empty,
            matching = profile.matching,
            "column kept as text"
        );
        return None;
    }

    let values: Vec<Option<f64>> = texts
        .iter()
        .map(|text| parse_match_value(&match_value(text)))
        .collect();
    let malformed = texts
        .iter()
        .zip(&values)
        .filter(|(text, parsed)| !cleaned_cell(text).is_empty() && parsed.is_none())
        .count();
    if malformed > 0 {
        tracing::debug!(malformed, "unparseable cells set to null during coercion");
    }
    Some(values)
}
