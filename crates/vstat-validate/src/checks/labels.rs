//! Bilingual label round trip (VS005).

use polars::prelude::DataFrame;
use vstat_ingest::string_column_values;
use vstat_model::BilingualLabel;
use vstat_model::columns::{REGION, REGION_CH, RESIDENCE_CH, RESIDENCE_EN};

use crate::issue::{Issue, push_sample};

/// (Chinese column, English column) pairs to check.
const LABEL_PAIRS: [(&str, &str); 2] = [(RESIDENCE_CH, RESIDENCE_EN), (REGION_CH, REGION)];

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (chinese_column, english_column) in LABEL_PAIRS {
        let (Ok(chinese), Ok(english)) = (
            string_column_values(df, chinese_column),
            string_column_values(df, english_column),
        ) else {
            continue;
        };

        let mut count = 0u64;
        let mut samples = Vec::new();
        for (chinese, english) in chinese.into_iter().zip(english) {
            let Some(chinese) = chinese else {
                continue;
            };
            let label = BilingualLabel { chinese, english };
            if !rejoins(&label) {
                count += 1;
                push_sample(&mut samples, label.to_string());
            }
        }
        if count > 0 {
            issues.push(Issue::LabelRoundTrip {
                column: english_column.to_string(),
                count,
                samples,
            });
        }
    }
    issues
}

/// True when the label has both halves and splitting its joined form gives it back.
fn rejoins(label: &BilingualLabel) -> bool {
    label.english.is_some() && BilingualLabel::parse(&label.to_string()) == *label
}
