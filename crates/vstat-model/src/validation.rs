use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A problem found while checking a normalized table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Check identifier (e.g., "VS002").
    pub code: String,
    /// Human-readable message describing the issue.
    pub message: String,
    pub severity: IssueSeverity,
    /// Column the check looked at (if applicable).
    pub column: Option<String>,
    /// Number of offending rows or cells.
    pub count: Option<u64>,
}

/// Issues collected for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts() {
        let mut report = ValidationReport::default();
        report.push(ValidationIssue {
            code: "VS002".to_string(),
            message: "YYYY does not match YYY + 1911".to_string(),
            severity: IssueSeverity::Error,
            column: Some("YYYY".to_string()),
            count: Some(2),
        });
        report.push(ValidationIssue {
            code: "VS005".to_string(),
            message: "residence label has no English part".to_string(),
            severity: IssueSeverity::Warning,
            column: Some("RESIDENCE".to_string()),
            count: Some(1),
        });
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&IssueSeverity::Warning).expect("serialize");
        assert_eq!(json, "\"warning\"");
    }
}
