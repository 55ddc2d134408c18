//! Table types shared by the NIBRS loader, normalizer and front ends.
//!
//! - [`RawTable`]: header row plus untyped cells, as handed over by a loader.
//! - [`CleanTable`]: normalized output with typed columns and a row index.
//!
//! Downstream consumers (charts, table views) only ever see a [`CleanTable`]
//! and switch on [`Column`] / [`ColumnKind`] instead of probing cell types.

mod frame;
mod raw;
mod table;

pub use frame::format_numeric;
pub use raw::{RawTable, RawValue};
pub use table::{CleanTable, Column, ColumnKind, LabeledColumn, RowIndex};
