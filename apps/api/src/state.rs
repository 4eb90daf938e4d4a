use std::sync::Arc;

use crate::matching::cache::MatchCache;
use crate::matching::scorer::{KeywordMatchScorer, MatchScorer};
use crate::store::{InMemoryStore, Store};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Pluggable match scorer. Default: KeywordMatchScorer.
    pub scorer: Arc<dyn MatchScorer>,
    pub match_cache: Arc<MatchCache>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, scorer: Arc<dyn MatchScorer>) -> Self {
        Self {
            store,
            scorer,
            match_cache: Arc::new(MatchCache::new()),
        }
    }

    /// In-memory store with the keyword scorer.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), Arc::new(KeywordMatchScorer))
    }
}
