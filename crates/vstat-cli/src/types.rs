use std::path::PathBuf;

use vstat_model::ValidationReport;
use vstat_transform::NormalizeStats;

/// Inputs of one `normalize` run, resolved from the command line.
#[derive(Debug, Clone)]
pub struct NormalizeRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub separator: u8,
    pub dry_run: bool,
    pub validate: bool,
}

#[derive(Debug)]
pub struct NormalizeResult {
    pub input: PathBuf,
    /// `None` when nothing was written (dry run or blocking validation errors).
    pub output: Option<PathBuf>,
    pub stats: NormalizeStats,
    pub regions: Vec<RegionSummary>,
    pub validation: Option<ValidationReport>,
    pub has_errors: bool,
}

/// Per-region totals of the normalized table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    pub region_ch: String,
    pub region: Option<String>,
    /// Distinct residences, including the residual one.
    pub residences: usize,
    pub rows: usize,
    pub visitors: i64,
}
