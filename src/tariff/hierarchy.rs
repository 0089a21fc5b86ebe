//! Breadcrumb reconstruction from the dash-indented tariff outline.
//!
//! The builder walks rows in book order, keeping the heading text active at
//! each nesting level. A heading at level L replaces level L and drops every
//! deeper level. Level-0 rows whose 4-character code prefix matches the
//! current heading are subcode variants: they take the current path and leave
//! the state untouched.

use std::collections::{BTreeMap, HashMap};

use super::level::{clean_description, dash_level, heading_prefix};
use super::TariffRow;
use crate::lookup::LookupEntry;

const PATH_SEPARATOR: &str = " > ";

/// Mutable state carried between rows.
#[derive(Debug, Default)]
struct HierarchyState {
    /// level -> cleaned heading text
    level_text: BTreeMap<usize, String>,
    /// prefix of the last genuine level-0 heading
    heading_prefix: Option<String>,
}

impl HierarchyState {
    fn is_subcode_variant(&self, level: usize, prefix: &str) -> bool {
        level == 0 && self.heading_prefix.as_deref() == Some(prefix)
    }

    fn enter(&mut self, level: usize, prefix: &str, text: String) {
        if level == 0 {
            self.heading_prefix = Some(prefix.to_string());
        }
        self.level_text.insert(level, text);
        self.level_text.retain(|active, _| *active <= level);
    }

    /// Active headings joined in ascending level order.
    fn path(&self) -> String {
        self.level_text
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR)
    }
}

/// Builds the code -> `LookupEntry` mapping from ordered tariff rows.
///
/// Row order encodes the tree and is never changed. Malformed rows (blank code
/// or blank description) are skipped without touching the state.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    state: HierarchyState,
    entries: HashMap<String, LookupEntry>,
    skipped: usize,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full pass over `rows`.
    pub fn build<'a, I>(rows: I) -> HashMap<String, LookupEntry>
    where
        I: IntoIterator<Item = &'a TariffRow>,
    {
        let mut builder = Self::new();
        for row in rows {
            builder.push(row);
        }
        builder.finish()
    }

    /// Feed the next row in book order.
    pub fn push(&mut self, row: &TariffRow) {
        let code = row.code.trim();
        if code.is_empty() {
            self.skip("blank code", row);
            return;
        }

        let text = clean_description(&row.description_en);
        if text.is_empty() {
            self.skip("blank description", row);
            return;
        }

        let level = dash_level(&row.description_en);
        let prefix = heading_prefix(code);

        if !self.state.is_subcode_variant(level, prefix) {
            self.state.enter(level, prefix, text);
        }

        let entry = LookupEntry {
            hierarchy_path: self.state.path(),
            duty_rate: row.duty_rate.clone(),
            procedures: row.procedures.clone(),
        };

        if self.entries.insert(code.to_string(), entry).is_some() {
            log::debug!("duplicate tariff code {code}, keeping the later row");
        }
    }

    /// Number of rows skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> HashMap<String, LookupEntry> {
        if self.skipped > 0 {
            log::debug!("skipped {} malformed tariff rows", self.skipped);
        }
        self.entries
    }

    fn skip(&mut self, reason: &str, row: &TariffRow) {
        log::debug!("skipping tariff row ({reason}): {:?}", row.code);
        self.skipped += 1;
    }
}
