//! Calendar keys.
//!
//! Years in the source table are Republic of China (Minguo) years; the
//! Gregorian year is the ROC year plus 1911. Rows whose year is not a plain
//! digit string (notes that slipped past the footer, stray headings) or whose
//! month is not a real month are dropped here.

use chrono::NaiveDate;
use polars::prelude::{BooleanChunked, Column, DataFrame, NewChunkedArray};
use tracing::{debug, warn};

use vstat_ingest::string_column_values;
use vstat_model::columns::{MM, MONTHS, YEARS, YYY, YYYY, YYYYMM};

use crate::error::{Result, require_columns};

/// Calendar keys derived from one (year, month) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateKeys {
    pub roc_year: i64,
    pub year: i64,
    /// Two-digit month.
    pub month: String,
    /// Gregorian year followed by the two-digit month.
    pub year_month: String,
}

/// Parse an ROC year made only of ASCII digits.
pub fn parse_roc_year(value: &str) -> Option<i64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Build the calendar keys for a raw year and month, or `None` if either is invalid.
pub fn date_keys(raw_year: &str, raw_month: &str, roc_year_offset: i64) -> Option<DateKeys> {
    let roc_year = parse_roc_year(raw_year)?;
    let year = roc_year.checked_add(roc_year_offset)?;
    if raw_month.is_empty() || !raw_month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month: u32 = raw_month.parse().ok()?;
    let first_day = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    let month = first_day.format("%m").to_string();
    Some(DateKeys {
        roc_year,
        year,
        year_month: format!("{year}{month}"),
        month,
    })
}

/// Drop rows with invalid years or months and add `YYY`, `YYYY`, `MM` and `YYYYMM`.
///
/// Returns the number of rows dropped.
pub fn derive_date_keys(df: &mut DataFrame, roc_year_offset: i64) -> Result<usize> {
    require_columns(df, &[YEARS, MONTHS])?;
    let years = string_column_values(df, YEARS)?;
    let months = string_column_values(df, MONTHS)?;

    let keys: Vec<Option<DateKeys>> = years
        .iter()
        .zip(&months)
        .map(|(year, month)| date_keys(year.as_deref()?, month.as_deref()?, roc_year_offset))
        .collect();
    let mask: Vec<bool> = keys.iter().map(Option::is_some).collect();
    let dropped = mask.iter().filter(|keep| !**keep).count();
    if dropped > 0 {
        *df = df.filter(&BooleanChunked::from_slice("keep".into(), &mask))?;
        warn!(dropped, "rows with invalid year or month dropped");
    }

    let kept: Vec<DateKeys> = keys.into_iter().flatten().collect();
    df.with_column(Column::new(YYY.into(), kept.iter().map(|k| k.roc_year).collect::<Vec<i64>>()))?;
    df.with_column(Column::new(YYYY.into(), kept.iter().map(|k| k.year).collect::<Vec<i64>>()))?;
    df.with_column(Column::new(
        MM.into(),
        kept.iter().map(|k| k.month.as_str()).collect::<Vec<&str>>(),
    ))?;
    df.with_column(Column::new(
        YYYYMM.into(),
        kept.iter().map(|k| k.year_month.as_str()).collect::<Vec<&str>>(),
    ))?;

    debug!(rows = df.height(), dropped, "calendar keys derived");
    Ok(dropped)
}
