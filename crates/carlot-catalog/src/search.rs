//! Submit-to-search over the store's text index.
//!
//! Kept apart from [`crate::suggest`]: this path asks the store for
//! relevance-ordered index hits, whereas suggestions use a bounded substring
//! OR-match.

use std::sync::Arc;

use tracing::debug;

use crate::entry::CatalogEntry;
use crate::error::CatalogError;
use crate::store::CatalogStore;

/// `"N airbags"` in a query, for N in 2..=8.
pub fn airbag_hint(query: &str) -> Option<i64> {
    let lower = query.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    words.windows(2).find_map(|pair| match pair {
        [count, "airbags" | "airbag"] => count.parse::<i64>().ok().filter(|n| (2..=8).contains(n)),
        _ => None,
    })
}

#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn CatalogStore>,
    airbag_hint: bool,
}

impl SearchService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store, airbag_hint: false }
    }

    /// Narrow results to the airbag count named in the query, if any.
    pub fn with_airbag_hint(mut self, enabled: bool) -> Self {
        self.airbag_hint = enabled;
        self
    }

    /// Index-backed search. A blank query returns nothing without touching
    /// the store.
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits = self.store.search_text(query).await?;
        if self.airbag_hint {
            if let Some(airbags) = airbag_hint(query) {
                hits.retain(|entry| entry.airbag_count == airbags);
                debug!(airbags, "applied airbag hint");
            }
        }
        debug!(hits = hits.len(), store = self.store.name(), "text search");
        Ok(hits)
    }
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("store", &self.store.name())
            .field("airbag_hint", &self.airbag_hint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_catalog;
    use crate::store::memory::MemoryCatalog;

    #[test]
    fn airbag_phrases() {
        assert_eq!(airbag_hint("SUV with 6 airbags"), Some(6));
        assert_eq!(airbag_hint("2 Airbag hatchback"), Some(2));
        assert_eq!(airbag_hint("12 airbags"), None);
        assert_eq!(airbag_hint("airbags 6"), None);
        assert_eq!(airbag_hint("six airbags"), None);
    }

    #[tokio::test]
    async fn blank_query_skips_the_store() {
        let store = Arc::new(MemoryCatalog::with_entries(sample_catalog()));
        let service = SearchService::new(store.clone());
        assert!(service.search("  ").await.unwrap().is_empty());
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn delegates_to_text_index() {
        let store = Arc::new(MemoryCatalog::with_entries(sample_catalog()));
        let hits = SearchService::new(store).search("Honda").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].image_reference, "/var/uploads/abc.jpg");
    }

    #[tokio::test]
    async fn airbag_hint_is_opt_in() {
        let store = Arc::new(MemoryCatalog::with_entries(sample_catalog()));

        let plain = SearchService::new(store.clone()).search("SUV 8 airbags").await.unwrap();
        assert_eq!(plain.len(), 5);

        let hinted = SearchService::new(store)
            .with_airbag_hint(true)
            .search("SUV 8 airbags")
            .await
            .unwrap();
        let models: Vec<_> = hinted.iter().map(|e| e.model.as_str()).collect();
        assert_eq!(models, vec!["X5", "911"]);
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let store = Arc::new(MemoryCatalog::with_entries(sample_catalog()));
        store.set_offline(true);
        let err = SearchService::new(store).search("Honda").await.unwrap_err();
        assert!(matches!(err, CatalogError::Store(_)));
    }
}
