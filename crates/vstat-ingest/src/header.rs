//! Repair of the merged two-row header.
//!
//! The published table spans each age group label across its gender columns
//! with merged cells, which export as one filled cell followed by blanks. A
//! left-to-right forward fill restores the label on every column, after which
//! the label and sub-label rows are joined with `_` into column names such as
//! `20-29歲_男`.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame};
use tracing::debug;

use vstat_model::HeaderLayout;
use vstat_model::columns::HEADER_JOIN;

use crate::error::{IngestError, Result};
use crate::grid::RawGrid;

/// Header rows as read, and the column names built from them.
#[derive(Debug, Clone)]
pub struct WideHeaders {
    /// Joined `label_sublabel` names of the kept columns.
    pub columns: Vec<String>,
    /// Forward-filled label row (kept columns only).
    pub labels: Vec<String>,
    /// Forward-filled sub-label row (kept columns only).
    pub sublabels: Vec<String>,
}

impl WideHeaders {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the label row value for a column if present.
    pub fn label_for(&self, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.labels.get(idx).map(String::as_str)
    }
}

/// The wide table after header repair: one string column per wide column.
#[derive(Debug, Clone)]
pub struct WideTable {
    pub frame: DataFrame,
    pub headers: WideHeaders,
}

/// Fill blank cells from their nearest non-blank left neighbour.
pub fn forward_fill_row(row: &mut [Option<String>]) {
    let mut last: Option<String> = None;
    for cell in row.iter_mut() {
        if cell.is_some() {
            last.clone_from(cell);
        } else {
            cell.clone_from(&last);
        }
    }
}

/// Join label and sub-label cells with `_`; blanks join as empty strings.
pub fn join_header_rows(labels: &[Option<String>], sublabels: &[Option<String>]) -> Vec<String> {
    let width = labels.len().max(sublabels.len());
    (0..width)
        .map(|idx| {
            let label = labels.get(idx).and_then(Option::as_deref).unwrap_or("");
            let sublabel = sublabels.get(idx).and_then(Option::as_deref).unwrap_or("");
            format!("{label}{HEADER_JOIN}{sublabel}")
        })
        .collect()
}

/// Apply the header layout to a raw grid and build the wide DataFrame.
///
/// Every row is forward-filled, header and footer rows are removed, and the
/// trailing non-data columns are dropped. All columns are strings.
pub fn build_wide_table(grid: RawGrid, layout: &HeaderLayout) -> Result<WideTable> {
    let mut rows: Vec<Vec<Option<String>>> =
        grid.rows.into_iter().skip(layout.skip_rows).collect();
    let required = layout
        .data_start_row
        .max(layout.label_row + 1)
        .max(layout.sublabel_row + 1);
    if rows.len() < required {
        return Err(IngestError::TooFewRows {
            expected: required + layout.skip_rows,
            found: rows.len() + layout.skip_rows,
        });
    }
    for row in &mut rows {
        forward_fill_row(row);
    }

    let full_width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let width = full_width.saturating_sub(layout.trailing_columns);
    if width == 0 {
        return Err(IngestError::NoColumns {
            trailing: layout.trailing_columns,
        });
    }

    let mut labels = filled_strings(&rows[layout.label_row], width);
    let mut sublabels = filled_strings(&rows[layout.sublabel_row], width);
    let mut columns = join_header_rows(&rows[layout.label_row], &rows[layout.sublabel_row]);
    columns.resize(width, HEADER_JOIN.to_string());
    labels.truncate(width);
    sublabels.truncate(width);

    let mut seen = BTreeSet::new();
    for name in &columns {
        if !seen.insert(name.as_str()) {
            return Err(IngestError::DuplicateColumn {
                column: name.clone(),
            });
        }
    }

    let data_end = rows.len().saturating_sub(layout.footer_rows);
    let data_rows = &rows[layout.data_start_row..data_end.max(layout.data_start_row)];

    let frame_columns: Vec<Column> = columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<Option<String>> = data_rows
                .iter()
                .map(|row| row.get(idx).cloned().flatten())
                .collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();
    let frame = DataFrame::new(frame_columns)?;

    debug!(
        rows = frame.height(),
        columns = frame.width(),
        dropped_footer = layout.footer_rows,
        dropped_trailing = layout.trailing_columns,
        "wide table built"
    );

    Ok(WideTable {
        frame,
        headers: WideHeaders {
            columns,
            labels,
            sublabels,
        },
    })
}

fn filled_strings(row: &[Option<String>], width: usize) -> Vec<String> {
    (0..width)
        .map(|idx| row.get(idx).cloned().flatten().unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    None
                } else {
                    Some((*v).to_string())
                }
            })
            .collect()
    }

    #[test]
    fn test_forward_fill_row() {
        let mut row = cells(&["", "a", "", "", "b", ""]);
        forward_fill_row(&mut row);
        assert_eq!(row, cells(&["", "a", "a", "a", "b", "b"]));
    }

    #[test]
    fn test_join_header_rows() {
        let labels = cells(&["", "", "20-29", "20-29"]);
        let sublabels = cells(&["Residence", "Years", "Male", "Female"]);
        assert_eq!(
            join_header_rows(&labels, &sublabels),
            vec!["_Residence", "_Years", "20-29_Male", "20-29_Female"]
        );
    }

    #[test]
    fn test_build_wide_table_applies_layout() {
        let grid = RawGrid::from_rows([
            vec!["c0", "c1", "c2", "c3", "c4", "c5"],
            vec!["", "", "", "0-12", "", "note"],
            vec!["", "", "", "", "", ""],
            vec!["Residence", "Years", "Months", "M", "F", ""],
            vec!["亞洲地區(Asia)", "113", "1", "10", "20", "x"],
            vec!["日本(Japan)", "113", "1", "4", "6", "x"],
            vec!["footer", "", "", "", "", ""],
        ]);

        let table = build_wide_table(grid, &HeaderLayout::default()).unwrap();

        assert_eq!(
            table.headers.columns,
            vec!["_Residence", "_Years", "_Months", "0-12_M", "0-12_F"]
        );
        assert_eq!(table.headers.label_for("0-12_F"), Some("0-12"));
        assert_eq!(table.frame.height(), 2);
        assert_eq!(table.frame.width(), 5);
    }

    #[test]
    fn test_data_rows_are_forward_filled() {
        let grid = RawGrid::from_rows([
            vec!["", "", "L", ""],
            vec!["", "", "", ""],
            vec!["Residence", "Years", "A", "B"],
            vec!["日本(Japan)", "113", "5", ""],
        ]);
        let layout = HeaderLayout {
            skip_rows: 0,
            footer_rows: 0,
            trailing_columns: 0,
            ..HeaderLayout::default()
        };

        let table = build_wide_table(grid, &layout).unwrap();
        let values = table.frame.column("L_B").unwrap().str().unwrap();

        assert_eq!(values.get(0), Some("5"));
    }

    #[test]
    fn test_duplicate_column_is_an_error() {
        let grid = RawGrid::from_rows([
            vec!["", "", ""],
            vec!["", "", ""],
            vec!["Residence", "M", "M"],
            vec!["x", "1", "2"],
        ]);
        let layout = HeaderLayout {
            skip_rows: 0,
            footer_rows: 0,
            trailing_columns: 0,
            ..HeaderLayout::default()
        };

        let result = build_wide_table(grid, &layout);

        assert!(matches!(
            result,
            Err(IngestError::DuplicateColumn { column }) if column == "_M"
        ));
    }

    #[test]
    fn test_too_few_rows() {
        let grid = RawGrid::from_rows([vec!["a"], vec!["b"]]);
        let result = build_wide_table(grid, &HeaderLayout::default());
        assert!(matches!(
            result,
            Err(IngestError::TooFewRows {
                expected: 4,
                found: 2
            })
        ));
    }
}
