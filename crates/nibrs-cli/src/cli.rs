//! CLI argument definitions for the NIBRS explorer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "nibrs",
    version,
    about = "Explore the NIBRS 2024 crime-statistics tables",
    long_about = "Load, clean and inspect the FBI NIBRS 2024 CSV tables.\n\n\
                  Headers are repaired, placeholder columns dropped and numeric\n\
                  columns recovered from their formatted text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the known datasets and whether they load.
    Datasets(DatasetsArgs),

    /// Show the cleaned schema and first rows of one dataset.
    Show(ShowArgs),

    /// Write the first rows of the available datasets as CSV samples.
    Sample(SampleArgs),
}

#[derive(Parser)]
pub struct DataDirArg {
    /// Folder holding the NIBRS CSV exports.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,
}

#[derive(Parser)]
pub struct DatasetsArgs {
    #[command(flatten)]
    pub data: DataDirArg,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Dataset name (e.g. "Victims Age") or path to a CSV file.
    #[arg(value_name = "NAME|PATH")]
    pub source: String,

    #[command(flatten)]
    pub data: DataDirArg,

    /// Number of rows to preview.
    #[arg(long = "rows", default_value_t = 10)]
    pub rows: usize,

    /// Print the cleaned table as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct SampleArgs {
    /// Output directory for the sample files.
    #[arg(long = "out", value_name = "DIR")]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub data: DataDirArg,

    /// Rows written per dataset.
    #[arg(long = "rows", default_value_t = 50)]
    pub rows: usize,

    /// Maximum number of datasets to sample.
    #[arg(long = "limit", default_value_t = 5)]
    pub limit: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
