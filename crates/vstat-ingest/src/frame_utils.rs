//! Column extraction helpers shared by the transform and validate crates.

use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};

/// Column names in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Owned values of a string column.
pub fn string_column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| IngestError::ColumnNotFound {
            column: name.to_string(),
        })?;
    let values = column.str()?;
    Ok(values
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Values of an Int64 column.
pub fn i64_column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let column = df
        .column(name)
        .map_err(|_| IngestError::ColumnNotFound {
            column: name.to_string(),
        })?;
    Ok(column.i64()?.into_iter().collect())
}
