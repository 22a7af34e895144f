//! Wide-to-long reshaping.
//!
//! Each `AgeGroup_Gender` count column becomes one row per source row, with
//! the age group and gender split out of the column name. Total rows and
//! rows with any missing key or count are dropped, and the result is sorted
//! by its string keys.

use polars::prelude::{Column, DataFrame};
use tracing::debug;

use vstat_ingest::{i64_column_values, string_column_values};
use vstat_model::NormalizeOptions;
use vstat_model::columns::{AGEGROUP, COUNT, GENDER, HEADER_JOIN, MONTHS, REGION, RESIDENCE, YEARS};

use crate::error::{Result, require_columns};
use crate::numeric::count_columns;

/// Split a wide column name into age group and gender at the first `_`.
///
/// A name without `_` has no gender.
pub fn split_category(name: &str) -> (&str, Option<&str>) {
    match name.split_once(HEADER_JOIN) {
        Some((age_group, gender)) => (age_group, Some(gender)),
        None => (name, None),
    }
}

/// One melted observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRow {
    pub year: String,
    pub month: String,
    pub region: String,
    pub residence: String,
    pub age_group: String,
    pub gender: String,
    pub count: i64,
}

impl LongRow {
    fn sort_key(&self) -> (&str, &str, &str, &str, &str, &str) {
        (
            &self.year,
            &self.month,
            &self.region,
            &self.residence,
            &self.age_group,
            &self.gender,
        )
    }
}

/// Row accounting for [`melt_counts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeltStats {
    /// Wide rows times count columns.
    pub candidates: usize,
    /// Observations dropped because they came from a total row.
    pub dropped_total: usize,
    /// Observations dropped for a missing key or count.
    pub dropped_missing: usize,
}

/// Melt the count columns into long rows, sorted by their six string keys.
pub fn melt_rows(df: &DataFrame, options: &NormalizeOptions) -> Result<(Vec<LongRow>, MeltStats)> {
    require_columns(df, &[YEARS, MONTHS, REGION, RESIDENCE])?;
    let years = string_column_values(df, YEARS)?;
    let months = string_column_values(df, MONTHS)?;
    let regions = string_column_values(df, REGION)?;
    let residences = string_column_values(df, RESIDENCE)?;

    let mut stats = MeltStats::default();
    let mut rows = Vec::new();
    for name in count_columns(df) {
        let counts = i64_column_values(df, &name)?;
        let (age_group, gender) = split_category(&name);
        for (row, count) in counts.into_iter().enumerate() {
            stats.candidates += 1;
            if residences[row].as_deref() == Some(options.total_marker.as_str()) {
                stats.dropped_total += 1;
                continue;
            }
            let (
                Some(year),
                Some(month),
                Some(region),
                Some(residence),
                Some(gender),
                Some(count),
            ) = (
                &years[row],
                &months[row],
                &regions[row],
                &residences[row],
                gender,
                count,
            ) else {
                stats.dropped_missing += 1;
                continue;
            };
            rows.push(LongRow {
                year: year.clone(),
                month: month.clone(),
                region: region.clone(),
                residence: residence.clone(),
                age_group: age_group.to_string(),
                gender: gender.to_string(),
                count,
            });
        }
    }
    rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    debug!(
        candidates = stats.candidates,
        dropped_total = stats.dropped_total,
        dropped_missing = stats.dropped_missing,
        rows = rows.len(),
        "count columns melted"
    );
    Ok((rows, stats))
}

/// Build the long DataFrame from melted rows.
pub fn long_frame(rows: &[LongRow]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        string_column(YEARS, rows, |r| r.year.as_str()),
        string_column(MONTHS, rows, |r| r.month.as_str()),
        string_column(REGION, rows, |r| r.region.as_str()),
        string_column(RESIDENCE, rows, |r| r.residence.as_str()),
        string_column(AGEGROUP, rows, |r| r.age_group.as_str()),
        string_column(GENDER, rows, |r| r.gender.as_str()),
        Column::new(COUNT.into(), rows.iter().map(|r| r.count).collect::<Vec<i64>>()),
    ])?;
    Ok(df)
}

fn string_column(name: &str, rows: &[LongRow], value: impl Fn(&LongRow) -> &str) -> Column {
    Column::new(name.into(), rows.iter().map(value).collect::<Vec<&str>>())
}

/// Melt and sort the wide table into the long DataFrame.
pub fn melt_counts(df: &DataFrame, options: &NormalizeOptions) -> Result<(DataFrame, MeltStats)> {
    let (rows, stats) = melt_rows(df, options)?;
    Ok((long_frame(&rows)?, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide() -> DataFrame {
        DataFrame::new(vec![
            Column::new(RESIDENCE.into(), ["全部(ALL)", "日本(Japan)", "其他(Other)"]),
            Column::new(YEARS.into(), ["113", "113", "113"]),
            Column::new(MONTHS.into(), ["1", "1", "1"]),
            Column::new("20-39_Male".into(), [Some(10i64), Some(6), Some(4)]),
            Column::new("0-19_Female".into(), [Some(5i64), None, Some(5)]),
            Column::new(REGION.into(), ["亞洲地區(Asia)"; 3]),
        ])
        .unwrap()
    }

    #[test]
    fn test_split_category() {
        assert_eq!(split_category("20-29_Male"), ("20-29", Some("Male")));
        assert_eq!(split_category("a_b_c"), ("a", Some("b_c")));
        assert_eq!(split_category("Total"), ("Total", None));
    }

    #[test]
    fn test_melt_drops_totals_and_nulls() {
        let (rows, stats) = melt_rows(&wide(), &NormalizeOptions::default()).unwrap();

        assert_eq!(stats.candidates, 6);
        assert_eq!(stats.dropped_total, 2);
        assert_eq!(stats.dropped_missing, 1);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.residence != "全部(ALL)"));
    }

    #[test]
    fn test_melt_sorts_by_keys() {
        let (rows, _) = melt_rows(&wide(), &NormalizeOptions::default()).unwrap();

        let keys: Vec<(&str, &str, i64)> = rows
            .iter()
            .map(|r| (r.residence.as_str(), r.age_group.as_str(), r.count))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("其他(Other)", "0-19", 5),
                ("其他(Other)", "20-39", 4),
                ("日本(Japan)", "20-39", 6),
            ]
        );
    }

    #[test]
    fn test_long_frame_columns() {
        let (df, _) = melt_counts(&wide(), &NormalizeOptions::default()).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(
            vstat_ingest::column_names(&df),
            vec![YEARS, MONTHS, REGION, RESIDENCE, AGEGROUP, GENDER, COUNT]
        );
    }
}
