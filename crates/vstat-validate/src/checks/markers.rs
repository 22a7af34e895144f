//! Total marker leakage (VS001).

use polars::prelude::DataFrame;
use vstat_ingest::string_column_values;
use vstat_model::columns::{RESIDENCE_CH, RESIDENCE_EN};
use vstat_model::{BilingualLabel, NormalizeOptions};

use crate::issue::Issue;

/// Flag residence cells equal to the total marker or its matching half.
pub fn check(df: &DataFrame, options: &NormalizeOptions) -> Vec<Issue> {
    let marker = BilingualLabel::parse(&options.total_marker);
    let targets = [
        (RESIDENCE_CH, Some(marker.chinese.as_str())),
        (RESIDENCE_EN, marker.english.as_deref()),
    ];

    let mut issues = Vec::new();
    for (column, half) in targets {
        let Ok(values) = string_column_values(df, column) else {
            continue;
        };
        let count = values
            .iter()
            .flatten()
            .filter(|value| *value == &options.total_marker || Some(value.as_str()) == half)
            .count() as u64;
        if count > 0 {
            issues.push(Issue::TotalMarkerInOutput {
                column: column.to_string(),
                count,
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn test_flags_total_rows() {
        let df = DataFrame::new(vec![
            Column::new(RESIDENCE_CH.into(), ["全部", "日本"]),
            Column::new(RESIDENCE_EN.into(), [Some("ALL"), Some("Japan")]),
        ])
        .unwrap();

        let issues = check(&df, &NormalizeOptions::default());

        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|issue| issue.count() == 1));
    }

    #[test]
    fn test_clean_output() {
        let df = DataFrame::new(vec![
            Column::new(RESIDENCE_CH.into(), ["其他", "日本"]),
            Column::new(RESIDENCE_EN.into(), ["Other", "Japan"]),
        ])
        .unwrap();

        assert!(check(&df, &NormalizeOptions::default()).is_empty());
    }
}
