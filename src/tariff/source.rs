//! Reads the ordered tariff table from a CSV export of the tariff book.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::TariffRow;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("tariff table not found at {0}")]
    NotFound(String),

    #[error("tariff table has no '{0}' column")]
    MissingColumn(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    IO(#[from] std::io::Error),
}

/// Source header names for each logical column.
///
/// Defaults are the bilingual headers of the tariff book export. Each column
/// also matches its logical name (`code`, `hs_code`, `desc_en`, ...), so a
/// pre-renamed file loads unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    #[serde(default = "default_code")]
    pub code: String,
    #[serde(default = "default_desc_en")]
    pub desc_en: String,
    #[serde(default = "default_desc_ar")]
    pub desc_ar: String,
    #[serde(default = "default_duty_rate")]
    pub duty_rate: String,
    #[serde(default = "default_procedures")]
    pub procedures: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            code: default_code(),
            desc_en: default_desc_en(),
            desc_ar: default_desc_ar(),
            duty_rate: default_duty_rate(),
            procedures: default_procedures(),
        }
    }
}

fn default_code() -> String {
    "رمز النظام المنسق \n Harmonized Code".to_string()
}

fn default_desc_en() -> String {
    "الصنف باللغة الانجليزية \n Item English Name".to_string()
}

fn default_desc_ar() -> String {
    "الصنف باللغة العربية \n Item Arabic Name".to_string()
}

fn default_duty_rate() -> String {
    "فئة الرسم باللغة الانجليزية \n English Duty Rate".to_string()
}

fn default_procedures() -> String {
    "الاجراءات '\n Procedures".to_string()
}

/// Collapse whitespace runs so `"Code \n Name"` and `"Code Name"` compare equal.
fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Column positions resolved against an actual header row.
struct ColumnIndex {
    code: usize,
    desc_en: usize,
    desc_ar: Option<usize>,
    duty_rate: Option<usize>,
    procedures: Option<usize>,
}

impl ColumnMap {
    fn position(headers: &[String], configured: &str, aliases: &[&str]) -> Option<usize> {
        let configured = normalize_header(configured);
        headers.iter().position(|header| {
            *header == configured || aliases.iter().any(|alias| header.eq_ignore_ascii_case(alias))
        })
    }

    fn resolve(&self, headers: &csv::StringRecord) -> Result<ColumnIndex, SourceError> {
        let headers = headers.iter().map(normalize_header).collect::<Vec<_>>();

        let code = Self::position(&headers, &self.code, &["code", "hs_code"])
            .ok_or_else(|| SourceError::MissingColumn(self.code.clone()))?;
        let desc_en = Self::position(&headers, &self.desc_en, &["desc_en", "description_en"])
            .ok_or_else(|| SourceError::MissingColumn(self.desc_en.clone()))?;

        Ok(ColumnIndex {
            code,
            desc_en,
            desc_ar: Self::position(&headers, &self.desc_ar, &["desc_ar", "description_ar"]),
            duty_rate: Self::position(&headers, &self.duty_rate, &["duty_rate"]),
            procedures: Self::position(&headers, &self.procedures, &["procedures"]),
        })
    }
}

/// Read every row of the CSV file at `path`, in file order.
pub fn read_rows(path: &Path, columns: &ColumnMap) -> Result<Vec<TariffRow>, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.display().to_string()));
    }

    let file = std::fs::File::open(path)?;
    read_rows_from(file, columns)
}

/// Read tariff rows from any CSV reader. Every cell is kept as text so codes
/// keep their leading zeros.
pub fn read_rows_from<R: Read>(reader: R, columns: &ColumnMap) -> Result<Vec<TariffRow>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let index = columns.resolve(csv_reader.headers()?)?;

    let cell = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|idx| record.get(idx))
            .unwrap_or_default()
            .to_string()
    };

    let mut rows = vec![];
    for record in csv_reader.records() {
        let record = record?;
        rows.push(TariffRow {
            code: cell(&record, Some(index.code)).trim().to_string(),
            description_en: cell(&record, Some(index.desc_en)),
            description_ar: cell(&record, index.desc_ar),
            duty_rate: cell(&record, index.duty_rate),
            procedures: cell(&record, index.procedures),
        });
    }

    Ok(rows)
}
