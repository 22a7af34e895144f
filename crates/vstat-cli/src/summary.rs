use std::cmp::Ordering;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vstat_model::{BilingualLabel, IssueSeverity, ValidationIssue};

use crate::types::{NormalizeResult, RegionSummary};

pub fn print_summary(result: &NormalizeResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: not written"),
    }
    println!("{}", region_table(&result.regions));
    println!(
        "Wide rows: {}  Residual rows: {}  Dropped (missing): {}  Dropped (date): {}  Non-numeric cells: {}",
        result.stats.wide_rows,
        result.stats.residual_rows,
        result.stats.dropped_missing,
        result.stats.dropped_dates,
        result.stats.rejected_cells,
    );
    if let Some(report) = &result.validation {
        if !report.is_empty() {
            println!();
            println!("Issues:");
            println!("{}", issue_table(&report.issues));
        }
    }
}

pub fn region_table(regions: &[RegionSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Name"),
        header_cell("Residences"),
        header_cell("Rows"),
        header_cell("Visitors"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let mut total_rows = 0usize;
    let mut total_visitors = 0i64;
    for region in regions {
        total_rows += region.rows;
        total_visitors = total_visitors.saturating_add(region.visitors);
        table.add_row(vec![
            Cell::new(&region.region_ch)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            optional_cell(region.region.as_deref()),
            Cell::new(region.residences),
            Cell::new(region.rows),
            Cell::new(region.visitors),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All regions")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        Cell::new(total_visitors).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn issue_table(issues: &[ValidationIssue]) -> Table {
    let mut issues: Vec<&ValidationIssue> = issues.iter().collect();
    issues.sort_by(|a, b| {
        let severity = severity_rank(b.severity).cmp(&severity_rank(a.severity));
        if severity != Ordering::Equal {
            return severity;
        }
        a.code.cmp(&b.code)
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            optional_cell(issue.column.as_deref()),
            match issue.count {
                Some(count) => Cell::new(count).fg(severity_color(issue.severity)),
                None => dim_cell("-"),
            },
            Cell::new(&issue.message),
        ]);
    }
    table
}

pub fn region_label_table(labels: &[BilingualLabel]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Chinese"), header_cell("English")]);
    apply_table_style(&mut table);
    for label in labels {
        table.add_row(vec![
            Cell::new(&label.chinese),
            optional_cell(label.english.as_deref()),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 2,
        IssueSeverity::Warning => 1,
    }
}

fn severity_color(severity: IssueSeverity) -> Color {
    match severity {
        IssueSeverity::Error => Color::Red,
        IssueSeverity::Warning => Color::Yellow,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_table_has_total_row() {
        let table = region_table(&[RegionSummary {
            region_ch: "亞洲地區".to_string(),
            region: Some("Asia".to_string()),
            residences: 3,
            rows: 11,
            visitors: 860,
        }]);
        assert_eq!(table.row_count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("TOTAL"));
        assert!(rendered.contains("860"));
    }

    #[test]
    fn test_issue_table_orders_errors_first() {
        let warning = ValidationIssue {
            code: "VS005".to_string(),
            message: "label".to_string(),
            severity: IssueSeverity::Warning,
            column: None,
            count: Some(1),
        };
        let error = ValidationIssue {
            code: "VS002".to_string(),
            message: "year".to_string(),
            severity: IssueSeverity::Error,
            column: Some("YYYY".to_string()),
            count: Some(2),
        };
        let rendered = issue_table(&[warning, error]).to_string();
        let error_at = rendered.find("VS002").unwrap();
        let warning_at = rendered.find("VS005").unwrap();
        assert!(error_at < warning_at);
    }
}
