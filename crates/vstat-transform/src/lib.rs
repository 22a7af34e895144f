//! Visitor statistics normalization.
//!
//! Turns the repaired wide table from `vstat-ingest` into the long table:
//!
//! - **region**: derive `REGION` and mark region header rows as totals
//! - **numeric**: coerce count columns to integers
//! - **residual**: synthesize the per-region "Other" residence rows
//! - **melt**: wide-to-long over `AgeGroup_Gender` columns
//! - **labels**: split `中文(English)` labels into two columns
//! - **dates**: ROC year to Gregorian year and year-month keys
//! - **projection**: final column order and typed rows
//! - **pipeline**: all of the above in order

pub mod dates;
pub mod error;
pub mod labels;
pub mod melt;
pub mod numeric;
pub mod pipeline;
pub mod projection;
pub mod region;
pub mod residual;

pub use error::{Result, TransformError};
pub use pipeline::{NormalizeOutcome, NormalizeStats, normalize_file, normalize_table};
pub use projection::{project_output, rows_from_frame};
