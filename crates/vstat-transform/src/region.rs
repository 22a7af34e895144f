//! Region derivation.
//!
//! In the published table each block of countries is introduced by a region
//! row (`亞洲地區(Asia)` and so on) whose counts are the block total. The
//! region label is carried down onto every row of its block, and the region
//! row itself is relabelled as the block's total row.

use polars::prelude::{Column, DataFrame};
use tracing::debug;

use vstat_ingest::string_column_values;
use vstat_model::NormalizeOptions;
use vstat_model::columns::{REGION, RESIDENCE};

use crate::error::{Result, require_columns};

/// Region label for every row, filled down from the nearest region row.
///
/// Rows before the first region row get `None`.
pub fn fill_regions(
    residences: &[Option<String>],
    options: &NormalizeOptions,
) -> Vec<Option<String>> {
    let mut current: Option<String> = None;
    residences
        .iter()
        .map(|value| {
            if let Some(label) = value.as_deref().filter(|v| options.is_region_label(v)) {
                current = Some(label.to_string());
            }
            current.clone()
        })
        .collect()
}

/// Add the `REGION` column and replace region rows' residence with the total marker.
///
/// Returns the number of region rows found.
pub fn derive_region(df: &mut DataFrame, options: &NormalizeOptions) -> Result<usize> {
    require_columns(df, &[RESIDENCE])?;
    let residences = string_column_values(df, RESIDENCE)?;
    let regions = fill_regions(&residences, options);

    let mut region_rows = 0usize;
    let marked: Vec<Option<String>> = residences
        .into_iter()
        .map(|value| match value {
            Some(v) if options.is_region_label(&v) => {
                region_rows += 1;
                Some(options.total_marker.clone())
            }
            other => other,
        })
        .collect();

    df.with_column(Column::new(REGION.into(), regions))?;
    df.with_column(Column::new(RESIDENCE.into(), marked))?;

    debug!(region_rows, rows = df.height(), "regions derived");
    Ok(region_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residence_frame(values: &[Option<&str>]) -> DataFrame {
        DataFrame::new(vec![
            Column::new(RESIDENCE.into(), values.to_vec()),
            Column::new("0-19_Male".into(), vec![Some("1"); values.len()]),
        ])
        .unwrap()
    }

    #[test]
    fn test_fill_regions() {
        let options = NormalizeOptions::default();
        let residences = vec![
            Some("stray".to_string()),
            Some("亞洲地區(Asia)".to_string()),
            Some("日本(Japan)".to_string()),
            None,
            Some("美洲地區(Americas)".to_string()),
            Some("美國(U.S.A.)".to_string()),
        ];

        let regions = fill_regions(&residences, &options);

        assert_eq!(regions[0], None);
        assert_eq!(regions[2].as_deref(), Some("亞洲地區(Asia)"));
        assert_eq!(regions[3].as_deref(), Some("亞洲地區(Asia)"));
        assert_eq!(regions[5].as_deref(), Some("美洲地區(Americas)"));
    }

    #[test]
    fn test_derive_region_marks_totals() {
        let options = NormalizeOptions::default();
        let mut df = residence_frame(&[Some("亞洲地區(Asia)"), Some("日本(Japan)")]);

        let region_rows = derive_region(&mut df, &options).unwrap();

        assert_eq!(region_rows, 1);
        let residences = string_column_values(&df, RESIDENCE).unwrap();
        assert_eq!(residences[0].as_deref(), Some("全部(ALL)"));
        assert_eq!(residences[1].as_deref(), Some("日本(Japan)"));
        let regions = string_column_values(&df, REGION).unwrap();
        assert_eq!(regions, vec![Some("亞洲地區(Asia)".to_string()); 2]);
    }

    #[test]
    fn test_custom_region_labels() {
        let options = NormalizeOptions::default().with_region_labels(["Block A"]);
        let mut df = residence_frame(&[Some("Block A"), Some("亞洲地區(Asia)")]);

        assert_eq!(derive_region(&mut df, &options).unwrap(), 1);
        let regions = string_column_values(&df, REGION).unwrap();
        assert_eq!(regions[1].as_deref(), Some("Block A"));
    }
}
