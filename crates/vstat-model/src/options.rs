//! Configuration options for visitor statistics normalization.
//!
//! Defaults describe the published wide table exactly. A JSON file may
//! override any subset of the fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Residence value given to region header rows; these rows carry the region totals.
pub const TOTAL_MARKER: &str = "全部(ALL)";

/// Residence value of the synthesized residual rows.
pub const RESIDUAL_MARKER: &str = "其他(Other)";

/// Residence cells that start a new region block.
pub const DEFAULT_REGION_LABELS: [&str; 6] = [
    "亞洲地區(Asia)",
    "美洲地區(Americas)",
    "歐洲地區(Europe)",
    "大洋洲地區(Oceania)",
    "非洲地區(Africa)",
    "其他未列明(Unknow)",
];

/// Gregorian year = ROC year + offset.
pub const ROC_YEAR_OFFSET: i64 = 1911;

/// Position of the header, data, and footer rows in the raw grid.
///
/// Row indices are counted after `skip_rows` leading lines have been discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderLayout {
    /// Leading lines discarded before any row index applies.
    pub skip_rows: usize,
    /// Row holding the age group labels (merged across gender columns).
    pub label_row: usize,
    /// Row holding the gender sub-labels and identifier column names.
    pub sublabel_row: usize,
    /// First data row.
    pub data_start_row: usize,
    /// Footer rows dropped from the end.
    pub footer_rows: usize,
    /// Non-data columns dropped from the right edge.
    pub trailing_columns: usize,
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self {
            skip_rows: 1,
            label_row: 0,
            sublabel_row: 2,
            data_start_row: 3,
            footer_rows: 1,
            trailing_columns: 1,
        }
    }
}

/// Options controlling the normalization pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub layout: HeaderLayout,
    /// Exact residence values that mark a region header row.
    pub region_labels: Vec<String>,
    pub total_marker: String,
    pub residual_marker: String,
    pub roc_year_offset: i64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            layout: HeaderLayout::default(),
            region_labels: DEFAULT_REGION_LABELS
                .iter()
                .map(|label| (*label).to_string())
                .collect(),
            total_marker: TOTAL_MARKER.to_string(),
            residual_marker: RESIDUAL_MARKER.to_string(),
            roc_year_offset: ROC_YEAR_OFFSET,
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file; missing keys keep their defaults.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::OptionsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let options: Self =
            serde_json::from_str(&text).map_err(|source| ModelError::OptionsParse {
                path: path.to_path_buf(),
                source,
            })?;
        options.validate()?;
        Ok(options)
    }

    #[must_use]
    pub fn with_layout(mut self, layout: HeaderLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_region_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.region_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_region_label(&self, value: &str) -> bool {
        self.region_labels.iter().any(|label| label == value)
    }

    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.label_row >= layout.data_start_row || layout.sublabel_row >= layout.data_start_row
        {
            return Err(ModelError::InvalidOptions(format!(
                "header rows ({}, {}) must come before data_start_row {}",
                layout.label_row, layout.sublabel_row, layout.data_start_row
            )));
        }
        if self.region_labels.is_empty() {
            return Err(ModelError::InvalidOptions(
                "at least one region label is required".to_string(),
            ));
        }
        if self.total_marker.is_empty() || self.residual_marker.is_empty() {
            return Err(ModelError::InvalidOptions(
                "total and residual markers must not be empty".to_string(),
            ));
        }
        if self.total_marker == self.residual_marker {
            return Err(ModelError::InvalidOptions(format!(
                "total and residual markers must differ (both '{}')",
                self.total_marker
            )));
        }
        if self.is_region_label(&self.total_marker) || self.is_region_label(&self.residual_marker)
        {
            return Err(ModelError::InvalidOptions(
                "markers must not also be region labels".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = NormalizeOptions::default();
        options.validate().expect("defaults validate");
        assert_eq!(options.region_labels.len(), 6);
        assert!(options.is_region_label("歐洲地區(Europe)"));
        assert!(!options.is_region_label("日本(Japan)"));
    }

    #[test]
    fn rejects_header_after_data() {
        let options = NormalizeOptions::default().with_layout(HeaderLayout {
            sublabel_row: 3,
            ..HeaderLayout::default()
        });
        assert!(matches!(
            options.validate(),
            Err(ModelError::InvalidOptions(_))
        ));
    }

    #[test]
    fn rejects_identical_markers() {
        let options = NormalizeOptions {
            residual_marker: TOTAL_MARKER.to_string(),
            ..NormalizeOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options: NormalizeOptions =
            serde_json::from_str(r#"{"layout": {"skip_rows": 0}}"#).expect("parse");
        assert_eq!(options.layout.skip_rows, 0);
        assert_eq!(options.layout.sublabel_row, 2);
        assert_eq!(options.total_marker, TOTAL_MARKER);
        assert_eq!(options.roc_year_offset, 1911);
    }
}
