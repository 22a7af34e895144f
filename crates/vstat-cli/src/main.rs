//! Visitor statistics normalizer CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;
use vstat_cli::commands::{run_normalize, run_regions};
use vstat_cli::logging::{LogConfig, LogFormat, init_logging};
use vstat_cli::summary::{print_summary, region_label_table};
use vstat_cli::types::NormalizeRequest;
use vstat_output::parse_separator;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, NormalizeArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Normalize(args) => match normalize(args) {
            Ok(has_errors) => {
                if has_errors {
                    1
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Regions(args) => match run_regions(args.config.as_deref()) {
            Ok(labels) => {
                println!("{}", region_label_table(&labels));
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn normalize(args: &NormalizeArgs) -> anyhow::Result<bool> {
    let request = NormalizeRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        config: args.config.clone(),
        separator: parse_separator(&args.separator)?,
        dry_run: args.dry_run,
        validate: !args.no_validate,
    };
    let result = run_normalize(&request)?;
    print_summary(&result);
    Ok(result.has_errors)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
