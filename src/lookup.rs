//! Code -> hierarchy/duty/procedure lookup.
//!
//! The table is built once from the full tariff book and never mutated
//! afterwards. Clones share the same map, so a `LookupService` can be handed
//! to any number of readers without locking.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::search::{EnrichedHit, SearchHit};
use crate::tariff::{self, ColumnMap, HierarchyBuilder, SourceError, TariffRow};

/// Hierarchy context attached to one tariff code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub hierarchy_path: String,
    pub duty_rate: String,
    pub procedures: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("tariff source unavailable: {0}")]
    Source(#[from] SourceError),
}

/// Immutable code -> `LookupEntry` mapping.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: Arc<HashMap<String, LookupEntry>>,
}

impl LookupTable {
    /// Build from rows in tariff book order.
    pub fn build(rows: &[TariffRow]) -> Self {
        Self {
            entries: Arc::new(HierarchyBuilder::build(rows)),
        }
    }

    /// Read the CSV at `path` and build from it.
    pub fn from_path(path: &Path, columns: &ColumnMap) -> Result<Self, LookupError> {
        let rows = tariff::read_rows(path, columns)?;
        Ok(Self::build(&rows))
    }

    pub fn get(&self, code: &str) -> Option<&LookupEntry> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-only enrichment of search results with hierarchy context.
#[derive(Debug, Clone, Default)]
pub struct LookupService {
    table: LookupTable,
}

impl LookupService {
    pub fn new(table: LookupTable) -> Self {
        Self { table }
    }

    /// Service with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from the CSV at `path`, degrading to an empty service on failure.
    ///
    /// A failed build is reported once as a warning; enrichment then yields
    /// empty fields for every code.
    pub fn load_or_empty(path: &Path, columns: &ColumnMap) -> Self {
        log::info!("Building HS code hierarchy lookup from {}", path.display());

        match LookupTable::from_path(path, columns) {
            Ok(table) => {
                log::info!("Built lookup for {} HS codes with hierarchy paths", table.len());
                Self::new(table)
            }
            Err(err) => {
                log::warn!("Could not build HS lookup, hierarchy lookup disabled: {err}");
                Self::empty()
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<&LookupEntry> {
        self.table.get(code)
    }

    /// Entry for `code`, or all-empty fields on a miss.
    pub fn entry_or_default(&self, code: &str) -> LookupEntry {
        self.get(code).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Attach hierarchy context to each hit. Order and length are preserved.
    /// Codes are matched after trimming, as the table keys are.
    pub fn enrich(&self, hits: Vec<SearchHit>) -> Vec<EnrichedHit> {
        hits.into_iter()
            .map(|hit| {
                let entry = self.entry_or_default(hit.code.trim());
                EnrichedHit::new(hit, entry)
            })
            .collect()
    }
}
