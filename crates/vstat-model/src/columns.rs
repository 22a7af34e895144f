//! Column names used across the pipeline.
//!
//! The raw names come from joining the two header rows of the source table
//! with `_`; the identifier columns have a blank label row, hence the leading
//! underscore.

/// Country (or region header) of residence in the raw table.
pub const RESIDENCE: &str = "_Residence";
/// ROC year in the raw table.
pub const YEARS: &str = "_Years";
/// Month number in the raw table.
pub const MONTHS: &str = "_Months";

/// Derived region column. Holds the bilingual label until the label split,
/// then the English half.
pub const REGION: &str = "REGION";

/// Identifier columns that survive the melt, in sort order.
pub const ID_COLUMNS: [&str; 4] = [YEARS, MONTHS, REGION, RESIDENCE];

pub const AGEGROUP: &str = "AGEGROUP";
pub const GENDER: &str = "GENDER";
pub const COUNT: &str = "COUNT";

pub const YYY: &str = "YYY";
pub const YYYY: &str = "YYYY";
pub const MM: &str = "MM";
pub const YYYYMM: &str = "YYYYMM";
pub const REGION_CH: &str = "REGION_CH";
pub const RESIDENCE_CH: &str = "RESIDENCE_CH";
pub const RESIDENCE_EN: &str = "RESIDENCE";

/// Final column order of the normalized table.
pub const OUTPUT_COLUMNS: [&str; 11] = [
    YYY,
    YYYY,
    MM,
    YYYYMM,
    REGION_CH,
    REGION,
    RESIDENCE_CH,
    RESIDENCE_EN,
    AGEGROUP,
    GENDER,
    COUNT,
];

/// Separator between the label and sub-label parts of a wide column name.
pub const HEADER_JOIN: char = '_';

/// Returns true for the identifier columns that are never coerced to counts.
pub fn is_id_column(name: &str) -> bool {
    ID_COLUMNS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_columns_are_not_counts() {
        assert!(is_id_column("_Residence"));
        assert!(is_id_column("REGION"));
        assert!(!is_id_column("0-12_Male"));
    }

    #[test]
    fn output_columns_are_unique() {
        let mut sorted = OUTPUT_COLUMNS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), OUTPUT_COLUMNS.len());
    }
}
