//! Writing the normalized table to disk.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use polars::prelude::DataFrame;
use tempfile::TempDir;

use vstat_ingest::{build_wide_table, read_raw_grid_from_reader};
use vstat_model::NormalizeOptions;
use vstat_output::{CsvOutputOptions, render_csv, write_normalized_csv};
use vstat_transform::normalize_table;

const RAW_TABLE: &str = "\
來臺旅客按居住地分,,,,,,,
,,,0-19,,20-39,,備註
,,,,,,,
Residence,Years,Months,Male,Female,Male,Female,
亞洲地區(Asia),113,1,100,90,200,180,
日本(Japan),113,1,50,40,120,100,
韓國(Korea),113,1,30,-,60,50,
美洲地區(Americas),113,1,20,20,30,30,
美國(U.S.A.),113,1,15,12,25,-,
資料來源：交通部觀光署,,,,,,,
";

fn normalized_frame() -> DataFrame {
    let options = NormalizeOptions::default();
    let grid = read_raw_grid_from_reader(Cursor::new(RAW_TABLE), Path::new("rawdata.csv")).unwrap();
    let table = build_wide_table(grid, &options.layout).unwrap();
    normalize_table(&table.frame, &options).unwrap().output
}

/// First `n` lines of the rendered table.
fn head(csv: &str, n: usize) -> String {
    csv.lines().take(n).collect::<Vec<_>>().join("\n")
}

#[test]
fn normalized_csv_snapshot() {
    let mut df = normalized_frame();

    let csv = render_csv(&mut df, &CsvOutputOptions::default()).unwrap();

    insta::assert_snapshot!(head(&csv, 6), @r"
    YYY,YYYY,MM,YYYYMM,REGION_CH,REGION,RESIDENCE_CH,RESIDENCE,AGEGROUP,GENDER,COUNT
    113,2024,01,202401,亞洲地區,Asia,其他,Other,0-19,Female,50
    113,2024,01,202401,亞洲地區,Asia,其他,Other,0-19,Male,20
    113,2024,01,202401,亞洲地區,Asia,其他,Other,20-39,Female,30
    113,2024,01,202401,亞洲地區,Asia,其他,Other,20-39,Male,20
    113,2024,01,202401,亞洲地區,Asia,日本,Japan,0-19,Female,40
    ");
    assert_eq!(csv.lines().count(), 19);
}

#[test]
fn writes_file_and_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("normalized.csv");
    let mut df = normalized_frame();

    let written = write_normalized_csv(&path, &mut df, &CsvOutputOptions::default()).unwrap();

    assert_eq!(written, path);
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("YYY,YYYY,MM,YYYYMM,"));
    assert!(contents.contains("113,2024,01,202401,美洲地區,Americas,美國,U.S.A.,20-39,Male,25"));
}

#[test]
fn custom_separator() {
    let mut df = normalized_frame();

    let csv = render_csv(&mut df, &CsvOutputOptions::default().with_separator(b';')).unwrap();

    assert_eq!(
        head(&csv, 1),
        "YYY;YYYY;MM;YYYYMM;REGION_CH;REGION;RESIDENCE_CH;RESIDENCE;AGEGROUP;GENDER;COUNT"
    );
}

#[test]
fn unwritable_path_reports_context() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "x").unwrap();
    let mut df = normalized_frame();

    let err = write_normalized_csv(
        &blocker.join("normalized.csv"),
        &mut df,
        &CsvOutputOptions::default(),
    )
    .unwrap_err();

    assert!(err.to_string().starts_with("create "));
}
