//! Error types for raw table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the raw wide table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV record.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    /// CSV file has no rows at all.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Layout Errors ===
    /// Not enough rows for the configured header layout.
    #[error("expected at least {expected} rows for the header layout, found {found}")]
    TooFewRows { expected: usize, found: usize },

    /// No columns left after dropping the trailing non-data columns.
    #[error("no data columns left after dropping {trailing} trailing column(s)")]
    NoColumns { trailing: usize },

    /// Two wide columns ended up with the same joined name.
    #[error("duplicate column name '{column}' after joining header rows")]
    DuplicateColumn { column: String },

    // === DataFrame Errors ===
    /// Column not found in DataFrame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
