//! Delimited text output for the normalized table.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use vstat_model::columns::OUTPUT_COLUMNS;

/// Options for [`write_normalized_csv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOutputOptions {
    /// Field separator, `,` by default.
    pub separator: u8,
    pub include_header: bool,
}

impl Default for CsvOutputOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            include_header: true,
        }
    }
}

impl CsvOutputOptions {
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }
}

/// Parse a one-character separator argument; `\t` and `tab` mean a tab.
pub fn parse_separator(value: &str) -> Result<u8> {
    if matches!(value, "\\t" | "tab") {
        return Ok(b'\t');
    }
    let bytes = value.as_bytes();
    if bytes.len() != 1 || !bytes[0].is_ascii() || bytes[0] == b'"' || bytes[0] == b'\n' {
        bail!("separator must be a single ASCII character other than a quote or newline, got {value:?}");
    }
    Ok(bytes[0])
}

/// Write the table as delimited text to any writer.
///
/// The frame must already be in output column order.
pub fn write_csv_to<W: Write>(
    writer: &mut W,
    df: &mut DataFrame,
    options: &CsvOutputOptions,
) -> Result<()> {
    check_columns(df)?;
    CsvWriter::new(writer)
        .include_header(options.include_header)
        .with_separator(options.separator)
        .finish(df)
        .context("serialize normalized table")?;
    Ok(())
}

/// Render the table as a delimited text string.
pub fn render_csv(df: &mut DataFrame, options: &CsvOutputOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv_to(&mut buffer, df, options)?;
    String::from_utf8(buffer).context("normalized table is not valid UTF-8")
}

/// Write the normalized table to `path`, creating parent directories.
///
/// Returns the written path.
pub fn write_normalized_csv(
    path: &Path,
    df: &mut DataFrame,
    options: &CsvOutputOptions,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_csv_to(&mut writer, df, options)
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "normalized table written"
    );
    Ok(path.to_path_buf())
}

fn check_columns(df: &DataFrame) -> Result<()> {
    let names = df.get_column_names();
    let matches = names.len() == OUTPUT_COLUMNS.len()
        && names
            .iter()
            .zip(OUTPUT_COLUMNS)
            .all(|(name, expected)| name.as_str() == expected);
    if !matches {
        let found: Vec<&str> = names.iter().map(|name| name.as_str()).collect();
        bail!(
            "unexpected output columns [{}]; expected [{}]",
            found.join(", "),
            OUTPUT_COLUMNS.join(", ")
        );
    }
    Ok(())
}
