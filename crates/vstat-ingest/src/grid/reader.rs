//! CSV file reading without header interpretation.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// Every line of a CSV file as a row of optional cells.
///
/// Rows are padded to a common width; blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawGrid {
    /// Builds a grid from string cells, treating blank cells as missing.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| normalize_cell(cell.as_ref())).collect())
            .collect();
        let mut grid = Self { rows };
        grid.pad_rows();
        grid
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column)?.as_deref()
    }

    fn pad_rows(&mut self) {
        let width = self.width();
        for row in &mut self.rows {
            row.resize(width, None);
        }
    }
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reads every line of `path` into a [`RawGrid`].
pub fn read_raw_grid(path: &Path) -> Result<RawGrid> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    read_raw_grid_from_reader(file, path)
}

/// Reads CSV text from any reader; `origin` is only used in error messages.
pub fn read_raw_grid_from_reader<R: Read>(reader: R, origin: &Path) -> Result<RawGrid> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: origin.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(normalize_cell).collect::<Vec<_>>());
    }
    if rows.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: origin.to_path_buf(),
        });
    }
    let mut grid = RawGrid { rows };
    grid.pad_rows();
    tracing::debug!(
        path = %origin.display(),
        rows = grid.height(),
        columns = grid.width(),
        "raw grid loaded"
    );
    Ok(grid)
}
