//! Table normalization for NIBRS CSV exports.
//!
//! Turns a [`RawTable`](nibrs_model::RawTable) into a
//! [`CleanTable`](nibrs_model::CleanTable) in five steps:
//!
//! 1. **Header cleaning**: collapse line breaks and whitespace, repair known
//!    mis-decoded dash sequences and the `Nov-15` age-range label.
//! 2. **Unnamed removal**: drop loader placeholder columns (`Unnamed: N`).
//! 3. **Numeric coercion**: a column is converted as a whole when at least
//!    half of its non-empty cells look like plain decimal numbers.
//! 4. **Row index derivation**: adopt the first index-like column when its
//!    values are distinct whole numbers.
//! 5. **Default indexing**: otherwise label rows `1..=N`.
//!
//! Normalization never fails. Unparseable cells become nulls and a rejected
//! index column falls back to sequential labels.
//!
//! # Example
//!
//! ```
//! use nibrs_model::{ColumnKind, RawTable};
//! use nibrs_normalize::normalize_table;
//!
//! let raw = RawTable::from_text_columns(&[
//!     ("State", vec!["Alabama", "Alaska"]),
//!     ("Population1", vec!["1,234", "5,678"]),
//! ]);
//! let clean = normalize_table(&raw);
//! assert_eq!(clean.kind_of("Population1"), Some(ColumnKind::Numeric));
//! assert_eq!(clean.index().labels(), vec![1, 2]);
//! ```

mod header;
mod index;
mod normalize;
mod numeric;

pub use header::{UNNAMED_PREFIX, clean_header, is_unnamed};
pub use index::{IndexRejection, derive_row_index, find_index_column, is_index_like};
pub use normalize::normalize_table;
pub use numeric::{
    NUMERIC_RATIO_THRESHOLD, NumericProfile, cleaned_cell, coerce_column, match_value,
    parse_match_value,
};
