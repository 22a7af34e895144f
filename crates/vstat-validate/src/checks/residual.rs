//! Residual row consistency (VS006, VS007).
//!
//! Works on the wide table after residual rows were appended: within each
//! (year, month, region) group the residual row must equal the total row
//! minus the named residences, column by column.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, DataType};
use vstat_ingest::{column_names, i64_column_values, string_column_values};
use vstat_model::NormalizeOptions;
use vstat_model::columns::{MONTHS, REGION, RESIDENCE, YEARS, is_id_column};

use crate::issue::Issue;

#[derive(Debug, Default)]
struct Group {
    totals: Vec<usize>,
    residuals: Vec<usize>,
    members: Vec<usize>,
}

pub fn check(wide: &DataFrame, options: &NormalizeOptions) -> Vec<Issue> {
    let (Ok(years), Ok(months), Ok(regions), Ok(residences)) = (
        string_column_values(wide, YEARS),
        string_column_values(wide, MONTHS),
        string_column_values(wide, REGION),
        string_column_values(wide, RESIDENCE),
    ) else {
        return Vec::new();
    };

    let mut groups: BTreeMap<(Option<&str>, Option<&str>, Option<&str>), Group> = BTreeMap::new();
    for row in 0..wide.height() {
        let key = (
            years[row].as_deref(),
            months[row].as_deref(),
            regions[row].as_deref(),
        );
        let group = groups.entry(key).or_default();
        match residences[row].as_deref() {
            Some(r) if r == options.total_marker => group.totals.push(row),
            Some(r) if r == options.residual_marker => group.residuals.push(row),
            _ => group.members.push(row),
        }
    }

    let mut issues = Vec::new();
    for column in column_names(wide) {
        if is_id_column(&column) {
            continue;
        }
        let is_count = wide
            .column(&column)
            .is_ok_and(|c| c.dtype() == &DataType::Int64);
        if !is_count {
            continue;
        }
        let Ok(values) = i64_column_values(wide, &column) else {
            continue;
        };

        let mut mismatched = 0u64;
        let mut negative = 0u64;
        for group in groups.values() {
            let [total] = group.totals.as_slice() else {
                mismatched += group.residuals.len() as u64;
                continue;
            };
            let expected = match values[*total] {
                Some(total) => {
                    let members = group.members.iter().map(|&row| values[row]);
                    let Some(expected) = expected_residual(total, members) else {
                        mismatched += group.residuals.len().max(1) as u64;
                        continue;
                    };
                    Some(expected)
                }
                None => None,
            };
            if group.residuals.len() != 1 {
                mismatched += 1;
            }
            for &row in &group.residuals {
                if values[row] != expected {
                    mismatched += 1;
                } else if values[row].is_some_and(|value| value < 0) {
                    negative += 1;
                }
            }
        }

        if mismatched > 0 {
            issues.push(Issue::ResidualMismatch {
                column: column.clone(),
                count: mismatched,
            });
        }
        if negative > 0 {
            issues.push(Issue::NegativeResidual { column, count: negative });
        }
    }
    issues
}

/// Total minus the non-null member counts; `None` on `i64` overflow.
fn expected_residual(total: i64, members: impl Iterator<Item = Option<i64>>) -> Option<i64> {
    let named = members.flatten().try_fold(0i64, i64::checked_add)?;
    total.checked_sub(named)
}
