//! Error types for the normalization pipeline.

use thiserror::Error;

use vstat_ingest::IngestError;
use vstat_model::ModelError;

/// Errors raised while normalizing a wide table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column the pipeline depends on is absent.
    #[error("required column '{column}' not found")]
    MissingColumn { column: String },

    /// No total row exists for a (year, month, region) combination.
    #[error("no '{marker}' row for year {year}, month {month}, region {region}")]
    MissingTotalRow {
        marker: String,
        year: String,
        month: String,
        region: String,
    },

    /// More than one total row exists for a (year, month, region) combination.
    #[error(
        "{count} '{marker}' rows for year {year}, month {month}, region {region}; expected exactly one"
    )]
    DuplicateTotalRow {
        marker: String,
        year: String,
        month: String,
        region: String,
        count: usize,
    },

    /// The residual of a group does not fit in an `i64`.
    #[error("count overflow in column '{column}' for year {year}, month {month}, region {region}")]
    CountOverflow {
        year: String,
        month: String,
        region: String,
        column: String,
    },

    /// A non-nullable output column held a null.
    #[error("unexpected null in column '{column}' at row {row}")]
    UnexpectedNull { column: String, row: usize },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Options(#[from] ModelError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Display form of an optional key part in error messages.
pub(crate) fn display_key(value: Option<&str>) -> String {
    value.unwrap_or("<missing>").to_string()
}

/// Fail with [`TransformError::MissingColumn`] for the first absent column.
pub(crate) fn require_columns(
    df: &polars::prelude::DataFrame,
    columns: &[&str],
) -> Result<()> {
    for column in columns {
        if df.get_column_index(column).is_none() {
            return Err(TransformError::MissingColumn {
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}
