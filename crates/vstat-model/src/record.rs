use serde::{Deserialize, Serialize};

use crate::label::BilingualLabel;

/// One row of the normalized long table.
///
/// Field order and serialized names match the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    #[serde(rename = "YYY")]
    pub roc_year: i64,
    #[serde(rename = "YYYY")]
    pub year: i64,
    #[serde(rename = "MM")]
    pub month: String,
    #[serde(rename = "YYYYMM")]
    pub year_month: String,
    #[serde(rename = "REGION_CH")]
    pub region_ch: String,
    #[serde(rename = "REGION")]
    pub region: Option<String>,
    #[serde(rename = "RESIDENCE_CH")]
    pub residence_ch: String,
    #[serde(rename = "RESIDENCE")]
    pub residence: Option<String>,
    #[serde(rename = "AGEGROUP")]
    pub age_group: String,
    #[serde(rename = "GENDER")]
    pub gender: String,
    #[serde(rename = "COUNT")]
    pub count: i64,
}

impl NormalizedRow {
    pub fn residence_label(&self) -> BilingualLabel {
        BilingualLabel {
            chinese: self.residence_ch.clone(),
            english: self.residence.clone(),
        }
    }

    pub fn region_label(&self) -> BilingualLabel {
        BilingualLabel {
            chinese: self.region_ch.clone(),
            english: self.region.clone(),
        }
    }
}
