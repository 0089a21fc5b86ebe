use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{
    app::errors::AppError,
    classify::{ClassifiedItem, Classifier, InvoiceItem},
    config::Config,
    lookup::{LookupEntry, LookupService},
    search::{EnrichedHit, SearchHit, SearchService},
};

/// An invoice line together with the candidates the vector search returned for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub item: InvoiceItem,
    #[serde(default)]
    pub candidates: Vec<SearchHit>,
}

/// Lookup result for one queried code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeLookup {
    pub hs_code: String,
    pub found: bool,
    #[serde(flatten)]
    pub entry: LookupEntry,
}

pub struct AppService {
    config: Config,
    search: SearchService,
    classifier: Classifier,
}

impl AppService {
    pub fn new(config: Config, search: SearchService, classifier: Classifier) -> Self {
        Self {
            config,
            search,
            classifier,
        }
    }

    pub fn lookup_service(&self) -> &LookupService {
        self.search.lookup()
    }

    pub fn total(&self) -> usize {
        self.lookup_service().len()
    }

    pub fn lookup(&self, codes: &[String]) -> Vec<CodeLookup> {
        let lookup = self.lookup_service();
        codes
            .iter()
            .map(|code| {
                let code = code.trim();
                CodeLookup {
                    hs_code: code.to_string(),
                    found: lookup.get(code).is_some(),
                    entry: lookup.entry_or_default(code),
                }
            })
            .collect()
    }

    pub fn enrich(&self, hits: Vec<SearchHit>) -> Vec<EnrichedHit> {
        self.lookup_service().enrich(hits)
    }

    /// Parse a JSON array of search hits and enrich it.
    pub fn enrich_json<R: Read>(&self, reader: R) -> Result<Vec<EnrichedHit>, AppError> {
        let hits: Vec<SearchHit> = serde_json::from_reader(reader)?;
        Ok(self.enrich(hits))
    }

    /// Classify lines whose candidates were retrieved ahead of time.
    pub fn classify(&self, requests: Vec<ClassifyRequest>) -> Vec<ClassifiedItem> {
        let top_k = self.config.search.top_k;
        requests
            .into_iter()
            .map(|request| {
                let mut hits = request.candidates;
                hits.truncate(top_k);
                let candidates = self.enrich(hits);
                self.classifier.classify(request.item, &candidates)
            })
            .collect()
    }

    pub fn classify_json<R: Read>(&self, reader: R) -> Result<Vec<ClassifiedItem>, AppError> {
        let requests: Vec<ClassifyRequest> = serde_json::from_reader(reader)?;
        Ok(self.classify(requests))
    }
}
