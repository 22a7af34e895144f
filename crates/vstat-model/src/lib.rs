//! Data model for visitor statistics normalization.
//!
//! Shared vocabulary for the other workspace crates:
//!
//! - **columns**: raw, intermediate, and output column names
//! - **label**: `中文(English)` bilingual labels
//! - **options**: table layout, markers, and region labels
//! - **record**: the typed form of one normalized output row
//! - **validation**: issues reported by post-run checks

pub mod columns;
pub mod error;
pub mod label;
pub mod options;
pub mod record;
pub mod validation;

pub use error::{ModelError, Result};
pub use label::BilingualLabel;
pub use options::{
    DEFAULT_REGION_LABELS, HeaderLayout, NormalizeOptions, RESIDUAL_MARKER, ROC_YEAR_OFFSET,
    TOTAL_MARKER,
};
pub use record::NormalizedRow;
pub use validation::{IssueSeverity, ValidationIssue, ValidationReport};
