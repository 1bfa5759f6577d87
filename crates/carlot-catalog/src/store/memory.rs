//! In-memory catalog for tests and local development.
//!
//! Rows live in a `Vec` in insertion order, which is the store-native order
//! returned by [`CatalogStore::find`]. Text search scores a row by the number
//! of distinct query words found among its [`TEXT_INDEX_FIELDS`].

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{text_terms, CatalogStore, TEXT_INDEX_FIELDS};
use crate::entry::CatalogEntry;
use crate::error::StoreError;
use crate::predicate::Predicate;

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    rows: RwLock<Vec<CatalogEntry>>,
    queries: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-loaded with `entries`; ids are assigned from 1.
    pub fn with_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let rows = entries
            .into_iter()
            .enumerate()
            .map(|(i, mut entry)| {
                entry.id = i as i64 + 1;
                entry
            })
            .collect();
        Self { rows: RwLock::new(rows), ..Self::default() }
    }

    /// Append a row and return its assigned id.
    pub async fn insert(&self, mut entry: CatalogEntry) -> i64 {
        let mut rows = self.rows.write().await;
        entry.id = rows.len() as i64 + 1;
        let id = entry.id;
        rows.push(entry);
        id
    }

    /// Number of `find` / `search_text` calls served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// While offline every query fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn begin_query(&self) -> Result<(), StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory catalog is offline".to_owned()));
        }
        Ok(())
    }

    fn index_terms(entry: &CatalogEntry) -> Vec<String> {
        TEXT_INDEX_FIELDS
            .iter()
            .flat_map(|field| text_terms(&entry.display(*field)))
            .collect()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    fn name(&self) -> &str {
        "memory"
    }

    async fn find(
        &self,
        predicate: &Predicate,
        limit: Option<usize>,
    ) -> Result<Vec<CatalogEntry>, StoreError> {
        self.begin_query()?;
        let rows = self.rows.read().await;
        let hits: Vec<CatalogEntry> = rows
            .iter()
            .filter(|entry| predicate.matches(entry))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        debug!(hits = hits.len(), "memory find");
        Ok(hits)
    }

    async fn search_text(&self, query: &str) -> Result<Vec<CatalogEntry>, StoreError> {
        self.begin_query()?;
        let terms = text_terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self.rows.read().await;
        let mut scored: Vec<(usize, &CatalogEntry)> = rows
            .iter()
            .filter_map(|entry| {
                let indexed = Self::index_terms(entry);
                let score = terms.iter().filter(|t| indexed.contains(t)).count();
                (score > 0).then_some((score, entry))
            })
            .collect();
        // Stable sort keeps insertion order between equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        debug!(hits = scored.len(), "memory text search");
        Ok(scored.into_iter().map(|(_, entry)| entry.clone()).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.rows.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_catalog;
    use crate::predicate::{Field, Value};

    #[tokio::test]
    async fn find_preserves_insertion_order_and_limit() {
        let store = MemoryCatalog::with_entries(sample_catalog());
        let suvs = Predicate::Eq { field: Field::BodyType, value: Value::Text("SUV".into()) };

        let all = store.find(&suvs, None).await.unwrap();
        let models: Vec<_> = all.iter().map(|e| e.model.as_str()).collect();
        assert_eq!(models, vec!["Creta", "Innova", "Nexon EV", "X5"]);

        let two = store.find(&suvs, Some(2)).await.unwrap();
        assert_eq!(two.len(), 2);
        assert_eq!(two[0].id, 2);
    }

    #[tokio::test]
    async fn text_search_ranks_by_matched_words() {
        let store = MemoryCatalog::with_entries(sample_catalog());
        let hits = store.search_text("diesel japan").await.unwrap();
        assert_eq!(hits[0].model, "Innova");
        assert!(hits.iter().any(|e| e.model == "City"));
        assert!(hits.iter().any(|e| e.model == "Creta"));
    }

    #[tokio::test]
    async fn text_search_covers_numeric_fields() {
        let store = MemoryCatalog::with_entries(sample_catalog());
        let hits = store.search_text("7").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].model, "Innova");
    }

    #[tokio::test]
    async fn offline_store_fails_and_counts() {
        let store = MemoryCatalog::new();
        store.set_offline(true);
        assert!(matches!(
            store.find(&Predicate::All, None).await,
            Err(StoreError::Unavailable(_))
        ));
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = MemoryCatalog::new();
        assert_eq!(store.insert(CatalogEntry::default()).await, 1);
        assert_eq!(store.insert(CatalogEntry::default()).await, 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }
}
