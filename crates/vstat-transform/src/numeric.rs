//! Count coercion.
//!
//! Every non-identifier column holds visitor counts as text. Cells that do
//! not read as whole numbers (blanks, `-` placeholders, notes) become null.

use polars::prelude::{Column, DataFrame, DataType};
use tracing::{debug, warn};

use vstat_ingest::{column_names, string_column_values};
use vstat_model::columns::is_id_column;

use crate::error::Result;

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Parse a count cell.
///
/// Accepts integer text and floating-point text with no fractional part
/// (`"1200"`, `"1200.0"`); anything else is `None`.
pub fn parse_count(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(count) = trimmed.parse::<i64>() {
        return Some(count);
    }
    let float = trimmed.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < MAX_EXACT_FLOAT {
        Some(float as i64)
    } else {
        None
    }
}

/// Non-identifier columns, in frame order.
pub fn count_columns(df: &DataFrame) -> Vec<String> {
    column_names(df)
        .into_iter()
        .filter(|name| !is_id_column(name))
        .collect()
}

/// Outcome of [`coerce_count_columns`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoercionStats {
    /// Count columns found.
    pub columns: usize,
    /// Non-blank cells that could not be read as counts.
    pub rejected: usize,
}

/// Replace every count column with its `Int64` coercion.
pub fn coerce_count_columns(df: &mut DataFrame) -> Result<CoercionStats> {
    let mut stats = CoercionStats::default();
    for name in count_columns(df) {
        stats.columns += 1;
        if df.column(&name)?.dtype() == &DataType::Int64 {
            continue;
        }
        let raw = string_column_values(df, &name)?;
        let mut rejected = 0usize;
        let counts: Vec<Option<i64>> = raw
            .iter()
            .map(|cell| {
                let cell = cell.as_deref()?;
                let parsed = parse_count(cell);
                if parsed.is_none() {
                    rejected += 1;
                }
                parsed
            })
            .collect();
        if rejected > 0 {
            debug!(column = %name, rejected, "non-numeric count cells set to null");
        }
        stats.rejected += rejected;
        df.with_column(Column::new(name.as_str().into(), counts))?;
    }
    if stats.rejected > 0 {
        warn!(
            columns = stats.columns,
            rejected = stats.rejected,
            "non-numeric count cells treated as missing"
        );
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vstat_ingest::i64_column_values;
    use vstat_model::columns::RESIDENCE;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1200"), Some(1200));
        assert_eq!(parse_count(" 42 "), Some(42));
        assert_eq!(parse_count("1200.0"), Some(1200));
        assert_eq!(parse_count("-3"), Some(-3));
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count("-"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("NaN"), None);
        assert_eq!(parse_count("inf"), None);
    }

    #[test]
    fn test_coerce_skips_id_columns() {
        let mut df = DataFrame::new(vec![
            Column::new(RESIDENCE.into(), vec![Some("日本(Japan)"), Some("韓國(Korea)")]),
            Column::new("0-19_Male".into(), vec![Some("10"), Some("-")]),
            Column::new("0-19_Female".into(), vec![None, Some("7")]),
        ])
        .unwrap();

        let stats = coerce_count_columns(&mut df).unwrap();

        assert_eq!(stats, CoercionStats { columns: 2, rejected: 1 });
        assert_eq!(df.column(RESIDENCE).unwrap().dtype(), &DataType::String);
        assert_eq!(i64_column_values(&df, "0-19_Male").unwrap(), vec![Some(10), None]);
        assert_eq!(i64_column_values(&df, "0-19_Female").unwrap(), vec![None, Some(7)]);
    }
}
