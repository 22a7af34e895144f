//! Residual ("Other") row synthesis.
//!
//! For each (year, month, region) group the table lists a total row and a
//! handful of named countries, and the countries rarely add up to the total.
//! The gap becomes an explicit residence so that the long table sums to the
//! published totals.

use std::collections::HashMap;

use polars::prelude::{Column, DataFrame};
use tracing::{debug, info};

use vstat_ingest::{column_names, i64_column_values, string_column_values};
use vstat_model::NormalizeOptions;
use vstat_model::columns::{MONTHS, REGION, RESIDENCE, YEARS};

use crate::error::{Result, TransformError, display_key, require_columns};
use crate::numeric::count_columns;

/// (year, month, region) key of a residual group.
pub type GroupKey = (Option<String>, Option<String>, Option<String>);

#[derive(Debug, Default)]
struct Group {
    totals: Vec<usize>,
    members: Vec<usize>,
}

/// Residual of one count column: the total minus the non-null member counts.
///
/// Returns `None` when the member sum or the difference overflows `i64`.
pub fn residual_count(total: i64, members: impl IntoIterator<Item = Option<i64>>) -> Option<i64> {
    let named = members
        .into_iter()
        .flatten()
        .try_fold(0i64, i64::checked_add)?;
    total.checked_sub(named)
}

/// Append one residual row per (year, month, region) group.
///
/// Groups keep the order in which they first appear. Every group needs exactly
/// one total row; count columns must already be `Int64`. Returns the number of
/// rows appended.
pub fn append_residual_rows(df: &mut DataFrame, options: &NormalizeOptions) -> Result<usize> {
    require_columns(df, &[YEARS, MONTHS, REGION, RESIDENCE])?;
    let years = string_column_values(df, YEARS)?;
    let months = string_column_values(df, MONTHS)?;
    let regions = string_column_values(df, REGION)?;
    let residences = string_column_values(df, RESIDENCE)?;

    let value_columns = count_columns(df);
    let values = value_columns
        .iter()
        .map(|name| i64_column_values(df, name))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut order: Vec<GroupKey> = Vec::new();
    let mut groups: HashMap<GroupKey, Group> = HashMap::new();
    for row in 0..df.height() {
        let key = (years[row].clone(), months[row].clone(), regions[row].clone());
        let group = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Group::default()
        });
        match residences[row].as_deref() {
            Some(r) if r == options.total_marker => group.totals.push(row),
            Some(r) if r == options.residual_marker => {}
            _ => group.members.push(row),
        }
    }

    let mut key_years = Vec::with_capacity(order.len());
    let mut key_months = Vec::with_capacity(order.len());
    let mut key_regions = Vec::with_capacity(order.len());
    let mut residuals: Vec<Vec<Option<i64>>> = vec![Vec::with_capacity(order.len()); values.len()];

    for key in order {
        let Some(group) = groups.remove(&key) else {
            continue;
        };
        let total_row = match group.totals.as_slice() {
            [row] => *row,
            [] => {
                return Err(TransformError::MissingTotalRow {
                    marker: options.total_marker.clone(),
                    year: display_key(key.0.as_deref()),
                    month: display_key(key.1.as_deref()),
                    region: display_key(key.2.as_deref()),
                });
            }
            many => {
                return Err(TransformError::DuplicateTotalRow {
                    marker: options.total_marker.clone(),
                    year: display_key(key.0.as_deref()),
                    month: display_key(key.1.as_deref()),
                    region: display_key(key.2.as_deref()),
                    count: many.len(),
                });
            }
        };

        for ((name, column), residual) in value_columns
            .iter()
            .zip(&values)
            .zip(residuals.iter_mut())
        {
            let Some(total) = column[total_row] else {
                residual.push(None);
                continue;
            };
            let members = group.members.iter().map(|&row| column[row]);
            let count = residual_count(total, members).ok_or_else(|| {
                TransformError::CountOverflow {
                    year: display_key(key.0.as_deref()),
                    month: display_key(key.1.as_deref()),
                    region: display_key(key.2.as_deref()),
                    column: name.clone(),
                }
            })?;
            residual.push(Some(count));
        }
        key_years.push(key.0);
        key_months.push(key.1);
        key_regions.push(key.2);
    }

    let appended = key_years.len();
    if appended == 0 {
        return Ok(0);
    }

    let mut by_name: HashMap<&str, Vec<Option<i64>>> = value_columns
        .iter()
        .map(String::as_str)
        .zip(residuals)
        .collect();

    let mut frame_columns = Vec::with_capacity(df.width());
    for name in column_names(df) {
        let column = match name.as_str() {
            YEARS => Column::new(name.as_str().into(), std::mem::take(&mut key_years)),
            MONTHS => Column::new(name.as_str().into(), std::mem::take(&mut key_months)),
            REGION => Column::new(name.as_str().into(), std::mem::take(&mut key_regions)),
            RESIDENCE => Column::new(
                name.as_str().into(),
                vec![Some(options.residual_marker.clone()); appended],
            ),
            other => {
                let counts = by_name.remove(other).unwrap_or_else(|| vec![None; appended]);
                Column::new(name.as_str().into(), counts)
            }
        };
        frame_columns.push(column);
    }
    let residual_frame = DataFrame::new(frame_columns)?;
    df.vstack_mut(&residual_frame)?;

    debug!(columns = value_columns.len(), "residual counts computed");
    info!(residual_rows = appended, total_rows = df.height(), "residual rows appended");
    Ok(appended)
}
