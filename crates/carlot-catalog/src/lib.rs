//! carlot-catalog – query construction and suggestion ranking for the car
//! catalog.
//!
//! The crate turns storefront requests into catalog queries and runs them
//! against a pluggable [`CatalogStore`]:
//!
//! - [`filter`]: compiles a sparse [`FilterSelection`] into a [`Predicate`]
//!   (price-band bucketing, numeric coercion, equality on everything else).
//! - [`suggest`]: typeahead suggestions from a free-text fragment, using a
//!   pluggable [`TermExtractor`] with a whitespace fallback.
//! - [`search`]: submit-to-search over the store's text index.
//! - [`store`]: the [`CatalogStore`] trait with SQLite and in-memory
//!   implementations.
//!
//! Image references are resolved to public URLs by [`image`].

pub mod entry;
pub mod error;
pub mod extract;
pub mod filter;
pub mod image;
pub mod predicate;
pub mod price;
pub mod search;
pub mod store;
pub mod suggest;

pub use entry::CatalogEntry;
pub use error::{CatalogError, ExtractError, StoreError};
pub use extract::{LexiconTagger, TermExtractor, WhitespaceSplitter};
pub use filter::{FilterCompiler, FilterSelection, UnknownFilterPolicy};
pub use predicate::{Field, Predicate, Value};
pub use price::PriceBand;
pub use search::SearchService;
pub use store::memory::MemoryCatalog;
pub use store::sqlite::SqliteCatalog;
pub use store::CatalogStore;
pub use suggest::SuggestionEngine;

#[cfg(test)]
pub(crate) mod fixtures;
