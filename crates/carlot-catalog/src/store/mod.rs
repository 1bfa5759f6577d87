//! Catalog store abstraction.
//!
//! [`CatalogStore`] is the only way the rest of the crate reaches the
//! catalog. It exposes two deliberately separate capabilities:
//!
//! - [`CatalogStore::find`]: predicate evaluation in store-native order,
//!   used by the filter listing and the suggestion engine.
//! - [`CatalogStore::search_text`]: relevance-ordered text-index search over
//!   [`TEXT_INDEX_FIELDS`], used by submit-to-search.
//!
//! [`sqlite::SqliteCatalog`] is the production implementation;
//! [`memory::MemoryCatalog`] backs tests and local development.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::entry::CatalogEntry;
use crate::error::StoreError;
use crate::predicate::{Field, Predicate};

/// Attributes covered by the text index.
pub const TEXT_INDEX_FIELDS: [Field; 8] = [
    Field::Model,
    Field::Brand,
    Field::CountryOfOrigin,
    Field::BodyType,
    Field::Color,
    Field::FuelType,
    Field::SeatCount,
    Field::AirbagCount,
];

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &str;

    /// Rows matching `predicate` in store-native order, at most `limit` of
    /// them when given.
    async fn find(
        &self,
        predicate: &Predicate,
        limit: Option<usize>,
    ) -> Result<Vec<CatalogEntry>, StoreError>;

    /// Rows matching any word of `query` in the text index, most relevant
    /// first.
    async fn search_text(&self, query: &str) -> Result<Vec<CatalogEntry>, StoreError>;

    /// Number of rows in the catalog.
    async fn count(&self) -> Result<u64, StoreError>;
}

/// Lower-cased alphanumeric words of `text`, deduplicated, in order.
///
/// Both stores tokenize text-search queries with this so that user input
/// never reaches an index query language unescaped. Words are matched whole:
/// no stemming and no diacritic folding, like the SQLite `unicode61
/// remove_diacritics 0` index.
pub fn text_terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let word = word.to_lowercase();
        if !terms.contains(&word) {
            terms.push(word);
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_terms_strip_operators() {
        assert_eq!(text_terms(r#"Honda "City" OR -red*"#), vec!["honda", "city", "or", "red"]);
        assert!(text_terms("!!! ???").is_empty());
    }

    #[test]
    fn text_terms_dedupe() {
        assert_eq!(text_terms("SUV suv Suv diesel"), vec!["suv", "diesel"]);
    }
}
