//! NIBRS data ingestion.
//!
//! This crate locates and decodes the CSV exports, hands them to the
//! normalizer and keeps the cleaned tables for the rest of the process.
//!
//! # Features
//!
//! - **CSV Loading**: UTF-8 first, one retry as Windows-1252, typed cells
//! - **Dataset Catalog**: the fixed list of NIBRS 2024 tables the dashboard knows
//! - **File Listing**: CSV files in a data directory
//! - **Table Cache**: load and normalize each source once per process
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use nibrs_ingest::{DatasetCache, find_dataset};
//!
//! let data_dir = Path::new("data");
//! let cache = DatasetCache::new();
//!
//! let dataset = find_dataset("Victims Age").expect("known dataset");
//! let table = cache.get_or_load(&dataset.path_in(data_dir));
//! println!("{} rows", table.row_count());
//! ```

mod cache;
mod catalog;
mod csv;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use crate::csv::{
    NULL_TOKENS, ParseError, SourceEncoding, load_clean_table, parse_raw_table, read_raw_table,
};

// === Dataset Catalog ===
pub use catalog::{DATASETS, Dataset, DatasetGroup, datasets_in, find_dataset};

// === File Discovery ===
pub use discovery::{list_csv_files, uncatalogued_csv_files};

// === Table Cache ===
pub use cache::{DatasetCache, SourceKey};
