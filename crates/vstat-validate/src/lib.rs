//! Run-time checks for normalized visitor statistics.
//!
//! The checks re-derive the properties the normalizer promises (no total
//! rows in the output, consistent calendar keys, reversible labels, residual
//! rows that close the region totals) and report violations without failing
//! the run themselves.

mod checks;
mod issue;

pub use issue::{Issue, MAX_SAMPLES};

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use vstat_model::{NormalizeOptions, ValidationReport};

/// Checks on the normalized long table (VS001-VS005).
pub fn validate_output(output: &DataFrame, options: &NormalizeOptions) -> ValidationReport {
    into_report(checks::run_output_checks(output, options))
}

/// Checks on the wide table with residual rows (VS006, VS007).
pub fn validate_wide(wide: &DataFrame, options: &NormalizeOptions) -> ValidationReport {
    into_report(checks::run_wide_checks(wide, options))
}

/// Both families of checks for one run.
pub fn validate_run(
    output: &DataFrame,
    wide: &DataFrame,
    options: &NormalizeOptions,
) -> ValidationReport {
    let mut report = validate_wide(wide, options);
    report.extend(validate_output(output, options));

    if report.is_empty() {
        debug!(rows = output.height(), "validation passed");
    } else {
        warn!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "validation found issues"
        );
    }
    report
}

fn into_report(issues: Vec<Issue>) -> ValidationReport {
    let mut report = ValidationReport::default();
    for issue in &issues {
        report.push(issue.to_validation_issue());
    }
    report
}
