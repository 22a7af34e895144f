//! CLI argument definitions for the visitor statistics normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vstat",
    version,
    about = "Normalize wide visitor statistics tables into long CSV",
    long_about = "Convert the published table of visitor arrivals by residence \
                  (age groups x gender, one row per country) into a long table \
                  with one row per year, month, region, residence, age group and gender.\n\n\
                  Region totals are split into named residences plus an explicit \
                  residual residence so that every region still sums to its total."
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
    /// Normalize a raw wide table into the long CSV.
    Normalize(NormalizeArgs),

    /// List the region labels that start a region block.
    Regions(RegionsArgs),
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Raw wide table as published.
    #[arg(value_name = "INPUT", default_value = "rawdata.csv")]
    pub input: PathBuf,

    /// Path of the normalized CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = "normalized.csv")]
    pub output: PathBuf,

    /// JSON file with layout, region labels and markers.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output field separator (a single character, or `tab`).
    #[arg(long = "separator", value_name = "CHAR", default_value = ",")]
    pub separator: String,

    /// Normalize and validate without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip run-time validation of the normalized table.
    #[arg(long = "no-validate")]
    pub no_validate: bool,
}

#[derive(Parser)]
pub struct RegionsArgs {
    /// JSON file with region labels.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
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
