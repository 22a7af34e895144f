//! Integration tests for reading and repairing the published wide table.

use std::io::Write;

use tempfile::NamedTempFile;

use vstat_ingest::{IngestError, read_wide_table, string_column_values};
use vstat_model::HeaderLayout;

const RAW_TABLE: &str = "\
來臺旅客按居住地分,,,,,,,
,,,0-19,,20-39,,備註
,,,,,,,
Residence,Years,Months,Male,Female,Male,Female,
亞洲地區(Asia),113,1,100,90,200,180,
日本(Japan),113,1,50,40,120,100,
韓國(Korea),113,1,30,-,60,50,
資料來源：交通部觀光署,,,,,,,
";

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn reads_published_layout() {
    let file = create_temp_csv(RAW_TABLE);

    let table = read_wide_table(file.path(), &HeaderLayout::default()).unwrap();

    assert_eq!(
        table.headers.columns,
        vec![
            "_Residence",
            "_Years",
            "_Months",
            "0-19_Male",
            "0-19_Female",
            "20-39_Male",
            "20-39_Female",
        ]
    );
    assert_eq!(table.frame.height(), 3);
    assert_eq!(
        string_column_values(&table.frame, "_Residence").unwrap(),
        vec![
            Some("亞洲地區(Asia)".to_string()),
            Some("日本(Japan)".to_string()),
            Some("韓國(Korea)".to_string()),
        ]
    );
}

#[test]
fn keeps_placeholder_cells_as_text() {
    let file = create_temp_csv(RAW_TABLE);

    let table = read_wide_table(file.path(), &HeaderLayout::default()).unwrap();
    let female = string_column_values(&table.frame, "0-19_Female").unwrap();

    assert_eq!(female[2].as_deref(), Some("-"));
}

#[test]
fn footer_is_dropped() {
    let file = create_temp_csv(RAW_TABLE);

    let table = read_wide_table(file.path(), &HeaderLayout::default()).unwrap();
    let residences = string_column_values(&table.frame, "_Residence").unwrap();

    assert!(
        residences
            .iter()
            .flatten()
            .all(|value| !value.starts_with("資料來源"))
    );
}

#[test]
fn header_only_table_has_no_rows() {
    let file = create_temp_csv(
        "title,,\n,,L\n,,\nResidence,Years,X\n",
    );
    let layout = HeaderLayout {
        footer_rows: 0,
        trailing_columns: 0,
        ..HeaderLayout::default()
    };

    let table = read_wide_table(file.path(), &layout).unwrap();

    assert_eq!(table.frame.height(), 0);
    assert_eq!(table.headers.columns, vec!["_Residence", "_Years", "L_X"]);
}

#[test]
fn truncated_file_reports_layout_error() {
    let file = create_temp_csv("title\n,,L\n");

    let result = read_wide_table(file.path(), &HeaderLayout::default());

    assert!(matches!(result, Err(IngestError::TooFewRows { .. })));
}
