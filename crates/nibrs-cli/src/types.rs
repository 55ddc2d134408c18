//! Results produced by the CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use nibrs_ingest::Dataset;
use nibrs_model::CleanTable;

/// Shape of a loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
    pub numeric_columns: usize,
}

impl TableShape {
    pub fn of(table: &CleanTable) -> Self {
        Self {
            rows: table.row_count(),
            columns: table.column_count(),
            numeric_columns: table.numeric_labels().len(),
        }
    }
}

/// One catalog entry and what was found for it.
#[derive(Debug, Clone)]
pub struct DatasetStatus {
    pub dataset: &'static Dataset,
    /// `None` when the source is missing, unreadable or empty.
    pub shape: Option<TableShape>,
}

#[derive(Debug, Clone)]
pub struct CatalogReport {
    pub data_dir: PathBuf,
    pub datasets: Vec<DatasetStatus>,
    /// CSV files present in the data directory, catalogued or not.
    pub csv_files: usize,
    /// CSV files in the data directory that are not catalog datasets.
    pub uncatalogued: Vec<PathBuf>,
}

impl CatalogReport {
    /// Datasets that loaded with at least one row and column.
    pub fn active_count(&self) -> usize {
        self.datasets.iter().filter(|s| s.shape.is_some()).count()
    }

    /// Status of a catalog dataset, if it was part of this report.
    pub fn status_of(&self, dataset: &Dataset) -> Option<&DatasetStatus> {
        self.datasets
            .iter()
            .find(|status| status.dataset.name == dataset.name)
    }

    pub fn total_rows(&self) -> usize {
        self.datasets
            .iter()
            .filter_map(|s| s.shape)
            .map(|shape| shape.rows)
            .sum()
    }
}

/// A resolved and loaded source.
#[derive(Debug, Clone)]
pub struct ShowResult {
    pub name: String,
    pub path: PathBuf,
    pub table: Arc<CleanTable>,
}

#[derive(Debug, Clone, Default)]
pub struct SampleReport {
    pub out_dir: PathBuf,
    pub written: Vec<PathBuf>,
    /// Datasets passed over because they were empty or could not be written.
    pub skipped: Vec<&'static str>,
}
