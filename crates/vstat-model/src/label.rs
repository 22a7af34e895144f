//! Bilingual `中文(English)` labels.
//!
//! Region and residence names in the source table carry both languages in a
//! single cell. The Chinese part runs up to the first `(`; the English part is
//! everything after it, minus the closing `)`.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BilingualLabel {
    pub chinese: String,
    /// `None` when the source text had no `(`.
    pub english: Option<String>,
}

impl BilingualLabel {
    pub fn new(chinese: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            chinese: chinese.into(),
            english: Some(english.into()),
        }
    }

    /// Split a combined label on its first `(`.
    pub fn parse(value: &str) -> Self {
        match value.split_once('(') {
            Some((chinese, rest)) => Self {
                chinese: chinese.to_string(),
                english: Some(rest.strip_suffix(')').unwrap_or(rest).to_string()),
            },
            None => Self {
                chinese: value.to_string(),
                english: None,
            },
        }
    }

    pub fn english_or_empty(&self) -> &str {
        self.english.as_deref().unwrap_or("")
    }

    /// True when rejoining reproduces `original` exactly.
    pub fn round_trips(&self, original: &str) -> bool {
        self.to_string() == original
    }
}

impl fmt::Display for BilingualLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.english {
            Some(english) => write!(f, "{}({})", self.chinese, english),
            None => f.write_str(&self.chinese),
        }
    }
}
