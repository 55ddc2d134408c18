//! CSV files present in a data directory.
//!
//! The catalog names the tables it knows; anything else exported next to
//! them (time-of-day tables, later releases) is still found here.

use std::path::{Path, PathBuf};

use crate::catalog::DATASETS;
use crate::error::{IngestError, Result};

fn is_csv_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Lists the CSV files directly inside `dir`, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let read_error = |source: std::io::Error| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = std::fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|entry| entry.path()).map_err(read_error))
        .filter(|entry| entry.as_ref().map_or(true, |path| is_csv_file(path)))
        .collect::<Result<Vec<_>>>()?;

    files.sort_unstable_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(dir = %dir.display(), count = files.len(), "listed CSV files");
    Ok(files)
}

/// CSV files in `dir` that no catalog dataset points at.
pub fn uncatalogued_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let is_catalogued = |path: &Path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| {
                DATASETS
                    .iter()
                    .any(|dataset| dataset.file_name.eq_ignore_ascii_case(name))
            })
    };
    Ok(list_csv_files(dir)?
        .into_iter()
        .filter(|path| !is_catalogued(path))
        .collect())
}
