//! The normalization pipeline.

use std::path::Path;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use vstat_ingest::read_wide_table;
use vstat_model::NormalizeOptions;

use crate::dates::derive_date_keys;
use crate::error::Result;
use crate::labels::split_bilingual_columns;
use crate::melt::melt_counts;
use crate::numeric::coerce_count_columns;
use crate::projection::project_output;
use crate::region::derive_region;
use crate::residual::append_residual_rows;

/// Row accounting for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Data rows in the wide table.
    pub wide_rows: usize,
    /// Region header rows turned into total rows.
    pub region_rows: usize,
    pub count_columns: usize,
    /// Non-blank count cells that were not numbers.
    pub rejected_cells: usize,
    pub residual_rows: usize,
    /// Observations dropped for missing keys or counts.
    pub dropped_missing: usize,
    /// Observations dropped for an invalid year or month.
    pub dropped_dates: usize,
    pub output_rows: usize,
}

/// Result of [`normalize_table`].
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    /// The normalized long table, in output column order.
    pub output: DataFrame,
    /// The wide table with `REGION`, integer counts and residual rows.
    pub wide: DataFrame,
    pub stats: NormalizeStats,
}

/// Normalize a repaired wide table.
pub fn normalize_table(wide: &DataFrame, options: &NormalizeOptions) -> Result<NormalizeOutcome> {
    options.validate()?;
    let span = info_span!("normalize", rows = wide.height(), columns = wide.width());
    let _guard = span.enter();
    let start = Instant::now();

    let mut stats = NormalizeStats {
        wide_rows: wide.height(),
        ..NormalizeStats::default()
    };

    let mut wide = wide.clone();
    stats.region_rows = derive_region(&mut wide, options)?;
    let coercion = coerce_count_columns(&mut wide)?;
    stats.count_columns = coercion.columns;
    stats.rejected_cells = coercion.rejected;
    stats.residual_rows = append_residual_rows(&mut wide, options)?;

    let (mut long, melt) = melt_counts(&wide, options)?;
    stats.dropped_missing = melt.dropped_missing;
    split_bilingual_columns(&mut long)?;
    stats.dropped_dates = derive_date_keys(&mut long, options.roc_year_offset)?;

    let output = project_output(&long)?;
    stats.output_rows = output.height();

    info!(
        wide_rows = stats.wide_rows,
        residual_rows = stats.residual_rows,
        output_rows = stats.output_rows,
        duration_ms = start.elapsed().as_millis(),
        "normalization complete"
    );

    Ok(NormalizeOutcome {
        output,
        wide,
        stats,
    })
}

/// Read a raw CSV file and normalize it.
pub fn normalize_file(path: &Path, options: &NormalizeOptions) -> Result<NormalizeOutcome> {
    options.validate()?;
    let table = read_wide_table(path, &options.layout)?;
    info!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.frame.height(),
        "raw table loaded"
    );
    normalize_table(&table.frame, options)
}
