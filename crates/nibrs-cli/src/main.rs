//! NIBRS explorer CLI.

use clap::{ColorChoice, Parser};
use nibrs_cli::commands::{run_datasets, run_sample, run_show};
use nibrs_cli::logging::{LogConfig, LogFormat, init_logging};
use nibrs_ingest::DatasetCache;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_catalog, print_sample, print_show};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let cache = DatasetCache::new();
    let result = match &cli.command {
        Command::Datasets(args) => {
            run_datasets(&args.data.data_dir, &cache).map(|report| print_catalog(&report))
        }
        Command::Show(args) => {
            run_show(&args.source, &args.data.data_dir, &cache).and_then(|result| {
                if args.json {
                    let json = serde_json::to_string_pretty(result.table.as_ref())?;
                    println!("{json}");
                } else {
                    print_show(&result, args.rows);
                }
                Ok(())
            })
        }
        Command::Sample(args) => run_sample(
            &args.data.data_dir,
            &args.out_dir,
            args.rows,
            args.limit,
            &cache,
        )
        .map(|report| print_sample(&report)),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
