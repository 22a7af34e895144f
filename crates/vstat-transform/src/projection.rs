//! Final column selection and typed row access.

use polars::prelude::DataFrame;

use vstat_ingest::{i64_column_values, string_column_values};
use vstat_model::NormalizedRow;
use vstat_model::columns::{
    AGEGROUP, COUNT, GENDER, MM, OUTPUT_COLUMNS, REGION, REGION_CH, RESIDENCE_CH, RESIDENCE_EN,
    YYY, YYYY, YYYYMM,
};

use crate::error::{Result, TransformError, require_columns};

/// Keep only the output columns, in output order.
pub fn project_output(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, &OUTPUT_COLUMNS)?;
    Ok(df.select(OUTPUT_COLUMNS)?)
}

/// Read a normalized frame back as typed rows.
pub fn rows_from_frame(df: &DataFrame) -> Result<Vec<NormalizedRow>> {
    require_columns(df, &OUTPUT_COLUMNS)?;
    let roc_years = i64_column_values(df, YYY)?;
    let years = i64_column_values(df, YYYY)?;
    let months = string_column_values(df, MM)?;
    let year_months = string_column_values(df, YYYYMM)?;
    let region_ch = string_column_values(df, REGION_CH)?;
    let region = string_column_values(df, REGION)?;
    let residence_ch = string_column_values(df, RESIDENCE_CH)?;
    let residence = string_column_values(df, RESIDENCE_EN)?;
    let age_groups = string_column_values(df, AGEGROUP)?;
    let genders = string_column_values(df, GENDER)?;
    let counts = i64_column_values(df, COUNT)?;

    (0..df.height())
        .map(|row| {
            let required = |column: &str, value: Option<String>| {
                value.ok_or_else(|| TransformError::UnexpectedNull {
                    column: column.to_string(),
                    row,
                })
            };
            let number = |column: &str, value: Option<i64>| {
                value.ok_or_else(|| TransformError::UnexpectedNull {
                    column: column.to_string(),
                    row,
                })
            };
            Ok(NormalizedRow {
                roc_year: number(YYY, roc_years[row])?,
                year: number(YYYY, years[row])?,
                month: required(MM, months[row].clone())?,
                year_month: required(YYYYMM, year_months[row].clone())?,
                region_ch: required(REGION_CH, region_ch[row].clone())?,
                region: region[row].clone(),
                residence_ch: required(RESIDENCE_CH, residence_ch[row].clone())?,
                residence: residence[row].clone(),
                age_group: required(AGEGROUP, age_groups[row].clone())?,
                gender: required(GENDER, genders[row].clone())?,
                count: number(COUNT, counts[row])?,
            })
        })
        .collect()
}
