//! Bilingual label splitting.

use polars::prelude::{Column, DataFrame};

use vstat_ingest::string_column_values;
use vstat_model::BilingualLabel;
use vstat_model::columns::{REGION, REGION_CH, RESIDENCE, RESIDENCE_CH, RESIDENCE_EN};

use crate::error::{Result, require_columns};

/// Chinese and English halves of a column of `中文(English)` labels.
pub fn split_labels(values: &[Option<String>]) -> (Vec<Option<String>>, Vec<Option<String>>) {
    values
        .iter()
        .map(|value| match value.as_deref().map(BilingualLabel::parse) {
            Some(label) => (Some(label.chinese), label.english),
            None => (None, None),
        })
        .unzip()
}

/// Replace the raw residence and region labels with their Chinese and English halves.
///
/// Adds `RESIDENCE_CH`, `RESIDENCE` and `REGION_CH`, and overwrites `REGION`
/// with the English half of the region label.
pub fn split_bilingual_columns(df: &mut DataFrame) -> Result<()> {
    require_columns(df, &[RESIDENCE, REGION])?;

    let (residence_ch, residence_en) = split_labels(&string_column_values(df, RESIDENCE)?);
    df.with_column(Column::new(RESIDENCE_CH.into(), residence_ch))?;
    df.with_column(Column::new(RESIDENCE_EN.into(), residence_en))?;

    let (region_ch, region_en) = split_labels(&string_column_values(df, REGION)?);
    df.with_column(Column::new(REGION_CH.into(), region_ch))?;
    df.with_column(Column::new(REGION.into(), region_en))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_labels() {
        let (ch, en) = split_labels(&[
            Some("美國(U.S.A.)".to_string()),
            Some("其他".to_string()),
            None,
        ]);
        assert_eq!(ch, vec![Some("美國".to_string()), Some("其他".to_string()), None]);
        assert_eq!(en, vec![Some("U.S.A.".to_string()), None, None]);
    }

    #[test]
    fn test_split_bilingual_columns() {
        let mut df = DataFrame::new(vec![
            Column::new(RESIDENCE.into(), ["日本(Japan)"]),
            Column::new(REGION.into(), ["亞洲地區(Asia)"]),
        ])
        .unwrap();

        split_bilingual_columns(&mut df).unwrap();

        let get = |name: &str| string_column_values(&df, name).unwrap()[0].clone();
        assert_eq!(get(RESIDENCE_CH).as_deref(), Some("日本"));
        assert_eq!(get(RESIDENCE_EN).as_deref(), Some("Japan"));
        assert_eq!(get(REGION_CH).as_deref(), Some("亞洲地區"));
        assert_eq!(get(REGION).as_deref(), Some("Asia"));
        assert_eq!(get(RESIDENCE).as_deref(), Some("日本(Japan)"));
    }
}
