//! Validation issue types.
//!
//! Each variant carries only the data its message needs; the shared
//! [`ValidationIssue`] record is built from it at report time.

use vstat_model::columns::{MM, YYYY, YYYYMM};
use vstat_model::{IssueSeverity, ValidationIssue};

/// Maximum number of offending values quoted in a message.
pub const MAX_SAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// A total row survived into the long table.
    TotalMarkerInOutput { column: String, count: u64 },
    /// `YYYY` is not `YYY` plus the ROC offset.
    YearMismatch { count: u64, samples: Vec<String> },
    /// `MM` is not a zero-padded month.
    InvalidMonth { count: u64, samples: Vec<String> },
    /// `YYYYMM` is not `YYYY` followed by `MM`.
    YearMonthMismatch { count: u64, samples: Vec<String> },
    /// A bilingual label lost its English half or does not rejoin to itself.
    LabelRoundTrip {
        column: String,
        count: u64,
        samples: Vec<String>,
    },
    /// A residual row is not the total minus its named residences.
    ResidualMismatch { column: String, count: u64 },
    /// Named residences add up to more than the total.
    NegativeResidual { column: String, count: u64 },
}

impl Issue {
    pub fn code(&self) -> &'static str {
        match self {
            Issue::TotalMarkerInOutput { .. } => "VS001",
            Issue::YearMismatch { .. } => "VS002",
            Issue::InvalidMonth { .. } => "VS003",
            Issue::YearMonthMismatch { .. } => "VS004",
            Issue::LabelRoundTrip { .. } => "VS005",
            Issue::ResidualMismatch { .. } => "VS006",
            Issue::NegativeResidual { .. } => "VS007",
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Issue::TotalMarkerInOutput { column, .. } => column,
            Issue::YearMismatch { .. } => YYYY,
            Issue::InvalidMonth { .. } => MM,
            Issue::YearMonthMismatch { .. } => YYYYMM,
            Issue::LabelRoundTrip { column, .. } => column,
            Issue::ResidualMismatch { column, .. } => column,
            Issue::NegativeResidual { column, .. } => column,
        }
    }

    pub fn count(&self) -> u64 {
        match self {
            Issue::TotalMarkerInOutput { count, .. }
            | Issue::YearMismatch { count, .. }
            | Issue::InvalidMonth { count, .. }
            | Issue::YearMonthMismatch { count, .. }
            | Issue::LabelRoundTrip { count, .. }
            | Issue::ResidualMismatch { count, .. }
            | Issue::NegativeResidual { count, .. } => *count,
        }
    }

    pub fn severity(&self) -> IssueSeverity {
        match self {
            Issue::LabelRoundTrip { .. } | Issue::NegativeResidual { .. } => IssueSeverity::Warning,
            _ => IssueSeverity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::TotalMarkerInOutput { column, count } => {
                format!("{count} rows in {column} still carry the total marker")
            }
            Issue::YearMismatch { count, samples } => format!(
                "{count} rows where YYYY is not YYY + ROC offset{}",
                sample_suffix(samples)
            ),
            Issue::InvalidMonth { count, samples } => format!(
                "{count} rows where MM is not a two-digit month{}",
                sample_suffix(samples)
            ),
            Issue::YearMonthMismatch { count, samples } => format!(
                "{count} rows where YYYYMM is not YYYY followed by MM{}",
                sample_suffix(samples)
            ),
            Issue::LabelRoundTrip {
                column,
                count,
                samples,
            } => format!(
                "{count} {column} labels have no English part or do not rejoin to the source label{}",
                sample_suffix(samples)
            ),
            Issue::ResidualMismatch { column, count } => format!(
                "{count} residual rows in {column} differ from the total minus named residences"
            ),
            Issue::NegativeResidual { column, count } => format!(
                "{count} residual counts in {column} are negative (named residences exceed the total)"
            ),
        }
    }

    pub fn to_validation_issue(&self) -> ValidationIssue {
        ValidationIssue {
            code: self.code().to_string(),
            message: self.message(),
            severity: self.severity(),
            column: Some(self.column().to_string()),
            count: Some(self.count()),
        }
    }
}

/// Collects up to [`MAX_SAMPLES`] distinct samples.
pub(crate) fn push_sample(samples: &mut Vec<String>, value: String) {
    if samples.len() < MAX_SAMPLES && !samples.contains(&value) {
        samples.push(value);
    }
}

fn sample_suffix(samples: &[String]) -> String {
    if samples.is_empty() {
        String::new()
    } else {
        format!(" (e.g. {})", samples.join(", "))
    }
}
