//! Validation check modules.
//!
//! Each module performs one family of checks. A check whose columns are
//! absent (or of the wrong type) is skipped rather than reported.

mod calendar;
mod labels;
mod markers;
mod residual;

use polars::prelude::DataFrame;
use vstat_model::NormalizeOptions;

use crate::issue::Issue;

/// Run every check that applies to the normalized long table.
pub fn run_output_checks(df: &DataFrame, options: &NormalizeOptions) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1. No total rows in the output (VS001)
    issues.extend(markers::check(df, options));

    // 2. Calendar key consistency (VS002-VS004)
    issues.extend(calendar::check(df, options));

    // 3. Bilingual label round trip (VS005)
    issues.extend(labels::check(df));

    issues
}

/// Run the checks that need the wide table with residual rows (VS006, VS007).
pub fn run_wide_checks(wide: &DataFrame, options: &NormalizeOptions) -> Vec<Issue> {
    residual::check(wide, options)
}
