//! Nearest-neighbor search over the tariff catalog, enriched with hierarchy
//! context.
//!
//! The vector backend itself lives outside this crate and is reached through
//! the `NearestNeighbor` trait.

use serde::{Deserialize, Serialize};

use crate::lookup::{LookupEntry, LookupService};

/// Default number of candidates requested per query.
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search service unavailable: {0}")]
    Unavailable(String),

    #[error("search backend error: {0}")]
    Backend(String),
}

/// One ranked result from the vector backend. Lower distance is closer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(alias = "hs_code")]
    pub code: String,
    #[serde(default)]
    pub desc_en: String,
    #[serde(default)]
    pub desc_ar: String,
    pub distance: f32,
}

/// A search hit with its place in the tariff tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedHit {
    pub hs_code: String,
    pub desc_en: String,
    pub desc_ar: String,
    pub distance: f32,
    #[serde(default)]
    pub hierarchy_path: String,
    #[serde(default)]
    pub duty_rate: String,
    #[serde(default)]
    pub procedures: String,
}

impl EnrichedHit {
    pub fn new(hit: SearchHit, entry: LookupEntry) -> Self {
        Self {
            hs_code: hit.code,
            desc_en: hit.desc_en,
            desc_ar: hit.desc_ar,
            distance: hit.distance,
            hierarchy_path: entry.hierarchy_path,
            duty_rate: entry.duty_rate,
            procedures: entry.procedures,
        }
    }
}

/// Opaque nearest-neighbor service: query text in, ranked hits out.
pub trait NearestNeighbor: Send + Sync {
    fn query(&self, text: &str, top_k: usize) -> Result<Vec<SearchHit>, SearchError>;
}

pub struct SearchService {
    backend: Option<Box<dyn NearestNeighbor>>,
    lookup: LookupService,
}

impl SearchService {
    pub fn new(backend: Box<dyn NearestNeighbor>, lookup: LookupService) -> Self {
        Self {
            backend: Some(backend),
            lookup,
        }
    }

    /// Service without a vector backend; every search is `Unavailable`.
    pub fn without_backend(lookup: LookupService) -> Self {
        Self {
            backend: None,
            lookup,
        }
    }

    pub fn lookup(&self) -> &LookupService {
        &self.lookup
    }

    /// Query the backend and enrich the hits, keeping backend rank order.
    pub fn search(&self, text: &str, top_k: usize) -> Result<Vec<EnrichedHit>, SearchError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| SearchError::Unavailable("collection not initialized".to_string()))?;

        let hits = backend.query(text, top_k)?;
        log::debug!("search backend returned {} hits for {text:?}", hits.len());

        Ok(self.lookup.enrich(hits))
    }
}
