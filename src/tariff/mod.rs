//! Tariff table parsing.
//!
//! - `level`: dash-level decoding of descriptions
//! - `hierarchy`: single-pass breadcrumb reconstruction over ordered rows
//! - `source`: CSV reading with header renaming

mod hierarchy;
pub mod level;
mod source;

use serde::{Deserialize, Serialize};

pub use hierarchy::HierarchyBuilder;
pub use source::{read_rows, read_rows_from, ColumnMap, SourceError};

/// One row of the tariff book, in printed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffRow {
    pub code: String,
    pub description_en: String,
    #[serde(default)]
    pub description_ar: String,
    #[serde(default)]
    pub duty_rate: String,
    #[serde(default)]
    pub procedures: String,
}

impl TariffRow {
    pub fn new(code: &str, description_en: &str, duty_rate: &str, procedures: &str) -> Self {
        Self {
            code: code.to_string(),
            description_en: description_en.to_string(),
            duty_rate: duty_rate.to_string(),
            procedures: procedures.to_string(),
            ..Default::default()
        }
    }
}
