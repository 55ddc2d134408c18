//! CSV reading utilities.

mod header;
mod reader;

pub use reader::{
    NULL_TOKENS, ParseError, SourceEncoding, load_clean_table, parse_raw_table, read_raw_table,
};
