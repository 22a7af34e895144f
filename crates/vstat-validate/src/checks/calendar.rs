//! Calendar key consistency (VS002, VS003, VS004).

use polars::prelude::DataFrame;
use vstat_ingest::{i64_column_values, string_column_values};
use vstat_model::NormalizeOptions;
use vstat_model::columns::{MM, YYY, YYYY, YYYYMM};

use crate::issue::{Issue, push_sample};

pub fn check(df: &DataFrame, options: &NormalizeOptions) -> Vec<Issue> {
    let mut issues = Vec::new();
    let roc_years = i64_column_values(df, YYY).ok();
    let years = i64_column_values(df, YYYY).ok();
    let months = string_column_values(df, MM).ok();
    let year_months = string_column_values(df, YYYYMM).ok();

    if let (Some(roc_years), Some(years)) = (&roc_years, &years) {
        let mut count = 0u64;
        let mut samples = Vec::new();
        for (roc_year, year) in roc_years.iter().zip(years) {
            let (Some(roc_year), Some(year)) = (roc_year, year) else {
                continue;
            };
            if roc_year.checked_add(options.roc_year_offset) != Some(*year) {
                count += 1;
                push_sample(&mut samples, format!("{roc_year}/{year}"));
            }
        }
        if count > 0 {
            issues.push(Issue::YearMismatch { count, samples });
        }
    }

    if let Some(months) = &months {
        let mut count = 0u64;
        let mut samples = Vec::new();
        for month in months.iter().flatten() {
            if !is_padded_month(month) {
                count += 1;
                push_sample(&mut samples, month.clone());
            }
        }
        if count > 0 {
            issues.push(Issue::InvalidMonth { count, samples });
        }
    }

    if let (Some(years), Some(months), Some(year_months)) = (&years, &months, &year_months) {
        let mut count = 0u64;
        let mut samples = Vec::new();
        for ((year, month), year_month) in years.iter().zip(months).zip(year_months) {
            let (Some(year), Some(month), Some(year_month)) = (year, month, year_month) else {
                continue;
            };
            if *year_month != format!("{year}{month}") {
                count += 1;
                push_sample(&mut samples, year_month.clone());
            }
        }
        if count > 0 {
            issues.push(Issue::YearMonthMismatch { count, samples });
        }
    }

    issues
}

/// True for `01` through `12`.
fn is_padded_month(value: &str) -> bool {
    value.len() == 2
        && value.bytes().all(|b| b.is_ascii_digit())
        && value.parse::<u32>().is_ok_and(|month| (1..=12).contains(&month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    fn calendar_frame(yyy: i64, yyyy: i64, mm: &str, yyyymm: &str) -> DataFrame {
        DataFrame::new(vec![
            Column::new(YYY.into(), [yyy]),
            Column::new(YYYY.into(), [yyyy]),
            Column::new(MM.into(), [mm]),
            Column::new(YYYYMM.into(), [yyyymm]),
        ])
        .unwrap()
    }

    #[test]
    fn test_consistent_keys() {
        let df = calendar_frame(113, 2024, "01", "202401");
        assert!(check(&df, &NormalizeOptions::default()).is_empty());
    }

    #[test]
    fn test_each_mismatch_is_reported() {
        let df = calendar_frame(113, 2023, "1", "20241");
        let codes: Vec<&str> = check(&df, &NormalizeOptions::default())
            .iter()
            .map(Issue::code)
            .collect();
        assert_eq!(codes, vec!["VS002", "VS003", "VS004"]);
    }

    #[test]
    fn test_is_padded_month() {
        assert!(is_padded_month("01"));
        assert!(is_padded_month("12"));
        assert!(!is_padded_month("1"));
        assert!(!is_padded_month("13"));
        assert!(!is_padded_month("00"));
        assert!(!is_padded_month("+1"));
    }
}
