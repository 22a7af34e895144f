//! Integration tests for the model crate.

use std::io::Write;

use proptest::prelude::*;
use tempfile::NamedTempFile;

use vstat_model::{BilingualLabel, ModelError, NormalizeOptions, NormalizedRow, TOTAL_MARKER};

#[test]
fn options_load_from_json_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"region_labels": ["亞洲地區(Asia)", "美洲地區(Americas)"], "layout": {{"footer_rows": 0}}}}"#
    )
    .unwrap();

    let options = NormalizeOptions::from_json_path(file.path()).expect("load options");

    assert_eq!(options.region_labels.len(), 2);
    assert_eq!(options.layout.footer_rows, 0);
    assert_eq!(options.layout.trailing_columns, 1);
    assert_eq!(options.total_marker, TOTAL_MARKER);
}

#[test]
fn options_load_rejects_bad_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let result = NormalizeOptions::from_json_path(file.path());

    assert!(matches!(result, Err(ModelError::OptionsParse { .. })));
}

#[test]
fn options_load_reports_missing_file() {
    let result = NormalizeOptions::from_json_path(std::path::Path::new("/no/such/options.json"));
    assert!(matches!(result, Err(ModelError::OptionsRead { .. })));
}

#[test]
fn options_load_rejects_empty_region_list() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"region_labels": []}}"#).unwrap();

    let result = NormalizeOptions::from_json_path(file.path());

    assert!(matches!(result, Err(ModelError::InvalidOptions(_))));
}

#[test]
fn normalized_row_serializes_with_output_names() {
    let row = NormalizedRow {
        roc_year: 113,
        year: 2024,
        month: "01".to_string(),
        year_month: "202401".to_string(),
        region_ch: "亞洲地區".to_string(),
        region: Some("Asia".to_string()),
        residence_ch: "日本".to_string(),
        residence: Some("Japan".to_string()),
        age_group: "20-29".to_string(),
        gender: "Male".to_string(),
        count: 42,
    };

    let json = serde_json::to_value(&row).expect("serialize");

    assert_eq!(json["YYYYMM"], "202401");
    assert_eq!(json["RESIDENCE_CH"], "日本");
    assert_eq!(row.residence_label().to_string(), "日本(Japan)");
    assert_eq!(row.region_label().to_string(), "亞洲地區(Asia)");
}

proptest! {
    #[test]
    fn bilingual_labels_round_trip(chinese in "[^(]{0,8}", english in ".{0,8}") {
        let original = format!("{chinese}({english})");
        let label = BilingualLabel::parse(&original);
        prop_assert_eq!(&label.chinese, &chinese);
        prop_assert_eq!(label.english.as_deref(), Some(english.as_str()));
        prop_assert!(label.round_trips(&original));
    }
}
