use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nibrs_ingest::{
    DATASETS, DatasetCache, IngestError, find_dataset, list_csv_files, uncatalogued_csv_files,
};
use nibrs_model::CleanTable;
use polars::prelude::{ChunkAgg, PolarsResult};
use tracing::{info, info_span, warn};

use crate::types::{CatalogReport, DatasetStatus, SampleReport, ShowResult, TableShape};

/// Loads every catalog dataset from `data_dir`.
pub fn run_datasets(data_dir: &Path, cache: &DatasetCache) -> Result<CatalogReport> {
    let span = info_span!("datasets", data_dir = %data_dir.display());
    let _guard = span.enter();

    let csv_files = list_csv_files(data_dir)
        .with_context(|| format!("list CSV files in {}", data_dir.display()))?;
    let datasets: Vec<DatasetStatus> = DATASETS
        .iter()
        .map(|dataset| {
            let table = cache.get_or_load(&dataset.path_in(data_dir));
            let shape = (!table.is_empty()).then(|| TableShape::of(&table));
            DatasetStatus { dataset, shape }
        })
        .collect();
    let uncatalogued = uncatalogued_csv_files(data_dir)
        .with_context(|| format!("list CSV files in {}", data_dir.display()))?;

    let report = CatalogReport {
        data_dir: data_dir.to_path_buf(),
        datasets,
        csv_files: csv_files.len(),
        uncatalogued,
    };
    info!(
        active = report.active_count(),
        csv_files = report.csv_files,
        "catalog loaded"
    );
    Ok(report)
}

/// Resolves a catalog name, a path, or a file name inside `data_dir`.
pub fn resolve_source(source: &str, data_dir: &Path) -> Result<(String, PathBuf), IngestError> {
    if let Some(dataset) = find_dataset(source) {
        return Ok((dataset.name.to_string(), dataset.path_in(data_dir)));
    }
    let candidates = [PathBuf::from(source), data_dir.join(source)];
    let path = candidates
        .into_iter()
        .find(|path| path.is_file())
        .ok_or_else(|| IngestError::UnknownDataset {
            name: source.to_string(),
        })?;
    let name = path
        .file_stem()
        .map_or_else(|| source.to_string(), |stem| stem.to_string_lossy().into_owned());
    Ok((name, path))
}

pub fn run_show(source: &str, data_dir: &Path, cache: &DatasetCache) -> Result<ShowResult> {
    let (name, path) = resolve_source(source, data_dir)?;
    let table = cache.get_or_load(&path);
    info!(dataset = %name, rows = table.row_count(), "dataset loaded");
    Ok(ShowResult { name, path, table })
}

/// Summary statistics of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub label: String,
    pub count: usize,
    pub sum: Option<f64>,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Computes count, sum, mean and range for every numeric column.
///
/// # Errors
///
/// Fails when the table cannot become a polars frame, which happens when two
/// cleaned labels are equal.
pub fn numeric_summary(table: &CleanTable) -> PolarsResult<Vec<ColumnStats>> {
    let frame = table.to_dataframe(None)?;
    table
        .numeric_labels()
        .into_iter()
        .map(|label| {
            let values = frame.column(label)?.as_materialized_series().f64()?;
            Ok(ColumnStats {
                label: label.to_string(),
                count: values.len() - values.null_count(),
                sum: (values.null_count() < values.len()).then(|| values.sum().unwrap_or(0.0)),
                mean: values.mean(),
                min: values.min(),
                max: values.max(),
            })
        })
        .collect()
}

/// File name used for a dataset sample.
pub fn sample_file_name(dataset_name: &str) -> String {
    format!("{}_sample.csv", dataset_name.replace(' ', "_"))
}

/// Writes the first `rows` rows of up to `limit` non-empty datasets.
pub fn run_sample(
    data_dir: &Path,
    out_dir: &Path,
    rows: usize,
    limit: usize,
    cache: &DatasetCache,
) -> Result<SampleReport> {
    let span = info_span!("sample", out_dir = %out_dir.display());
    let _guard = span.enter();

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;

    let mut report = SampleReport {
        out_dir: out_dir.to_path_buf(),
        ..SampleReport::default()
    };
    for dataset in DATASETS {
        if report.written.len() >= limit {
            break;
        }
        let table = cache.get_or_load(&dataset.path_in(data_dir));
        if table.is_empty() {
            report.skipped.push(dataset.name);
            continue;
        }
        let path = out_dir.join(sample_file_name(dataset.name));
        match write_sample(&table.head(rows), &path) {
            Ok(()) => {
                info!(dataset = dataset.name, path = %path.display(), "sample written");
                report.written.push(path);
            }
            Err(error) => {
                warn!(dataset = dataset.name, error = %format!("{error:#}"), "sample not written");
                report.skipped.push(dataset.name);
            }
        }
    }
    Ok(report)
}

/// Writes a table as CSV: cleaned labels, then one line per row. The row
/// index is not written.
pub fn write_sample(table: &CleanTable, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(table.labels())
        .context("write header")?;
    for row in 0..table.row_count() {
        writer
            .write_record(table.columns().map(|(_, column)| column.display_value(row)))
            .with_context(|| format!("write row {row}"))?;
    }
    writer.flush().context("flush sample")?;
    Ok(())
}
