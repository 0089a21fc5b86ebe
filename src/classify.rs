//! Invoice line classification.
//!
//! Picking the right candidate is delegated to a `CandidateSelector` (an LLM
//! in production). The classifier only applies the fallback policy when the
//! selector is missing or fails, and records which branch was taken.

use serde::{Deserialize, Serialize};

use crate::search::{EnrichedHit, SearchService, DEFAULT_TOP_K};

const UNKNOWN: &str = "Unknown";

#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("selector unavailable: {0}")]
    Unavailable(String),

    #[error("could not parse selector response: {0}")]
    Parse(String),
}

fn default_quantity() -> String {
    "1".to_string()
}

/// One invoice line as extracted from the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub item_description: String,
    #[serde(default = "default_quantity")]
    pub quantity: String,
    #[serde(default)]
    pub country_of_origin: String,
}

impl InvoiceItem {
    pub fn new(item_description: &str) -> Self {
        Self {
            item_description: item_description.to_string(),
            quantity: default_quantity(),
            country_of_origin: String::new(),
        }
    }
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// The selector's pick among the candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default = "unknown")]
    pub hs_code: String,
    #[serde(default = "unknown")]
    pub selected_arabic_description: String,
    #[serde(default = "unknown")]
    pub selected_english_description: String,
    #[serde(default)]
    pub reasoning: String,
}

impl Selection {
    /// Parse the selector's JSON answer. Missing keys fall back to "Unknown".
    pub fn from_json(text: &str) -> Result<Self, SelectError> {
        serde_json::from_str(text.trim()).map_err(|e| SelectError::Parse(e.to_string()))
    }
}

/// Opaque candidate selector: description + candidates in, one pick out.
pub trait CandidateSelector: Send + Sync {
    fn select(&self, description: &str, candidates: &[EnrichedHit])
        -> Result<Selection, SelectError>;
}

/// Which branch produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Selected,
    SelectorFailed,
    TopMatch,
    NoCandidates,
}

/// Classified invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    #[serde(flatten)]
    pub item: InvoiceItem,
    pub hs_code: String,
    pub arabic_description: String,
    pub english_description: String,
    pub reasoning: String,
    pub hierarchy_path: String,
    pub duty_rate: String,
    pub procedures: String,
    pub outcome: Outcome,
}

impl ClassifiedItem {
    fn from_candidate(item: InvoiceItem, hit: &EnrichedHit, reasoning: &str, outcome: Outcome) -> Self {
        Self {
            item,
            hs_code: hit.hs_code.clone(),
            arabic_description: hit.desc_ar.clone(),
            english_description: hit.desc_en.clone(),
            reasoning: reasoning.to_string(),
            hierarchy_path: hit.hierarchy_path.clone(),
            duty_rate: hit.duty_rate.clone(),
            procedures: hit.procedures.clone(),
            outcome,
        }
    }

    fn unknown(item: InvoiceItem) -> Self {
        Self {
            item,
            hs_code: unknown(),
            arabic_description: unknown(),
            english_description: unknown(),
            reasoning: "No matches found".to_string(),
            hierarchy_path: String::new(),
            duty_rate: String::new(),
            procedures: String::new(),
            outcome: Outcome::NoCandidates,
        }
    }
}

#[derive(Default)]
pub struct Classifier {
    selector: Option<Box<dyn CandidateSelector>>,
}

impl Classifier {
    /// Classifier that always takes the top candidate.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector(selector: Box<dyn CandidateSelector>) -> Self {
        Self {
            selector: Some(selector),
        }
    }

    /// Classify one item against its ranked candidates. Never fails.
    pub fn classify(&self, item: InvoiceItem, candidates: &[EnrichedHit]) -> ClassifiedItem {
        let Some(top) = candidates.first() else {
            log::info!("no candidates for {:?}", item.item_description);
            return ClassifiedItem::unknown(item);
        };

        let Some(selector) = &self.selector else {
            return ClassifiedItem::from_candidate(
                item,
                top,
                "Top vector search match (No LLM)",
                Outcome::TopMatch,
            );
        };

        match selector.select(&item.item_description, candidates) {
            Ok(selection) => {
                // context comes from the picked candidate when it is in the list
                let picked = candidates.iter().find(|c| c.hs_code == selection.hs_code);
                ClassifiedItem {
                    item,
                    hierarchy_path: picked.map(|c| c.hierarchy_path.clone()).unwrap_or_default(),
                    duty_rate: picked.map(|c| c.duty_rate.clone()).unwrap_or_default(),
                    procedures: picked.map(|c| c.procedures.clone()).unwrap_or_default(),
                    hs_code: selection.hs_code,
                    arabic_description: selection.selected_arabic_description,
                    english_description: selection.selected_english_description,
                    reasoning: selection.reasoning,
                    outcome: Outcome::Selected,
                }
            }
            Err(err) => {
                log::warn!("candidate selection failed: {err}");
                ClassifiedItem::from_candidate(
                    item,
                    top,
                    "Fallback to top vector match due to LLM error",
                    Outcome::SelectorFailed,
                )
            }
        }
    }

    /// Search and classify each item, preserving item order. A failed search
    /// counts as no candidates.
    pub fn classify_all(&self, items: Vec<InvoiceItem>, search: &SearchService) -> Vec<ClassifiedItem> {
        items
            .into_iter()
            .map(|item| {
                let candidates = search
                    .search(&item.item_description, DEFAULT_TOP_K)
                    .unwrap_or_else(|err| {
                        log::warn!("search failed for {:?}: {err}", item.item_description);
                        vec![]
                    });
                self.classify(item, &candidates)
            })
            .collect()
    }
}
