use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nibrs_ingest::{DatasetGroup, datasets_in};
use nibrs_model::{CleanTable, format_numeric};
use nibrs_cli::commands::{ColumnStats, numeric_summary};
use nibrs_cli::types::{CatalogReport, SampleReport, ShowResult};

pub fn print_catalog(report: &CatalogReport) {
    println!("Data directory: {}", report.data_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Group"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Numeric"),
    ]);
    apply_table_style(&mut table);
    for column in 2..5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for group in DatasetGroup::ALL {
        for status in datasets_in(group).filter_map(|dataset| report.status_of(dataset)) {
            let mut row = vec![Cell::new(status.dataset.name), Cell::new(group.label())];
            match status.shape {
                Some(shape) => {
                    row.push(Cell::new(shape.rows));
                    row.push(Cell::new(shape.columns));
                    row.push(Cell::new(shape.numeric_columns));
                }
                None => {
                    row.push(dim_cell("missing"));
                    row.push(dim_cell("-"));
                    row.push(dim_cell("-"));
                }
            }
            table.add_row(row);
        }
    }
    println!("{table}");
    println!(
        "Active datasets: {}/{}  Records: {}  CSV files: {}",
        report.active_count(),
        report.datasets.len(),
        report.total_rows(),
        report.csv_files
    );
    if !report.uncatalogued.is_empty() {
        println!("Other CSV files:");
        for path in &report.uncatalogued {
            println!("  {}", path.display());
        }
    }
}

pub fn print_show(result: &ShowResult, rows: usize) {
    println!("Dataset: {}", result.name);
    println!("Source: {}", result.path.display());
    let table = &result.table;
    if table.is_empty() {
        println!("No data available.");
        return;
    }
    println!(
        "Rows: {}  Columns: {}  Index: {}",
        table.row_count(),
        table.column_count(),
        if table.index().is_derived() {
            "derived"
        } else {
            "sequential"
        }
    );
    println!("{}", schema_table(table));
    match numeric_summary(table) {
        Ok(stats) if !stats.is_empty() => println!("{}", stats_table(&stats)),
        Ok(_) => {}
        Err(error) => tracing::warn!(%error, "numeric summary unavailable"),
    }
    println!("{}", preview_table(&table.head(rows)));
}

pub fn print_sample(report: &SampleReport) {
    println!("Output: {}", report.out_dir.display());
    for path in &report.written {
        println!("  wrote {}", path.display());
    }
    if report.written.is_empty() {
        println!("No datasets available to sample.");
    }
}

fn schema_table(clean: &CleanTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Non-null"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (label, column) in clean.columns() {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(column.kind()),
            Cell::new(column.non_null_count()),
        ]);
    }
    table
}

fn stats_table(stats: &[ColumnStats]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Sum"),
        header_cell("Mean"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for column in 1..6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for stat in stats {
        table.add_row(vec![
            Cell::new(&stat.label),
            Cell::new(stat.count),
            number_cell(stat.sum),
            number_cell(stat.mean.map(|mean| (mean * 100.0).round() / 100.0)),
            number_cell(stat.min),
            number_cell(stat.max),
        ]);
    }
    table
}

fn preview_table(clean: &CleanTable) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(clean.labels().map(header_cell));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (position, (_, column)) in clean.columns().enumerate() {
        if column.as_numeric().is_some() {
            align_column(&mut table, position + 1, CellAlignment::Right);
        }
    }
    for row in 0..clean.row_count() {
        let mut cells = vec![match clean.index().label(row) {
            Some(label) => dim_cell(&label.to_string()),
            None => dim_cell("-"),
        }];
        cells.extend(
            clean
                .columns()
                .map(|(_, column)| Cell::new(column.display_value(row))),
        );
        table.add_row(cells);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}

fn number_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_numeric(value)),
        None => dim_cell("-"),
    }
}
