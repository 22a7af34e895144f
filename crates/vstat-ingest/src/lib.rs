//! Raw wide-table ingestion.
//!
//! This crate loads the published visitor statistics CSV as a raw grid and
//! repairs its merged two-row header into a Polars DataFrame with one string
//! column per wide column.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use vstat_ingest::read_wide_table;
//! use vstat_model::HeaderLayout;
//!
//! let table = read_wide_table(Path::new("rawdata.csv"), &HeaderLayout::default())?;
//! println!("{} rows x {} columns", table.frame.height(), table.frame.width());
//! ```

mod error;
mod frame_utils;
mod grid;
mod header;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use grid::{RawGrid, read_raw_grid, read_raw_grid_from_reader};

// === Header Repair ===
pub use header::{WideHeaders, WideTable, build_wide_table, forward_fill_row, join_header_rows};

// === DataFrame Helpers ===
pub use frame_utils::{column_names, i64_column_values, string_column_values};

use std::path::Path;

use vstat_model::HeaderLayout;

/// Read a raw CSV file and repair its header in one step.
pub fn read_wide_table(path: &Path, layout: &HeaderLayout) -> Result<WideTable> {
    let grid = read_raw_grid(path)?;
    build_wide_table(grid, layout)
}
