//! Typeahead suggestions.
//!
//! A fragment is reduced to candidate terms by the configured
//! [`TermExtractor`] (falling back to a whitespace split when it finds
//! nothing), matched case-insensitively as a substring of any of
//! [`SUGGESTION_FIELDS`], and the first [`SUGGESTION_LIMIT`] rows in store
//! order are rendered as `"{brand} {model} {color}"`.
//!
//! Suggestions are a soft-fail affordance: any failure is logged and yields
//! an empty list.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::entry::CatalogEntry;
use crate::error::CatalogError;
use crate::extract::{TermExtractor, WhitespaceSplitter};
use crate::predicate::{Field, Predicate};
use crate::store::CatalogStore;

pub const SUGGESTION_LIMIT: usize = 5;

/// Attributes a suggestion term is matched against.
pub const SUGGESTION_FIELDS: [Field; 4] = [Field::Model, Field::Brand, Field::Color, Field::FuelType];

/// OR over terms of OR over [`SUGGESTION_FIELDS`].
pub fn suggestion_predicate(terms: &[String]) -> Predicate {
    Predicate::or(
        terms
            .iter()
            .map(|term| {
                Predicate::or(
                    SUGGESTION_FIELDS
                        .iter()
                        .map(|field| Predicate::Contains { field: *field, needle: term.clone() })
                        .collect(),
                )
            })
            .collect(),
    )
}

pub fn format_suggestion(entry: &CatalogEntry) -> String {
    format!("{} {} {}", entry.brand, entry.model, entry.color)
}

#[derive(Clone)]
pub struct SuggestionEngine {
    store: Arc<dyn CatalogStore>,
    extractor: Arc<dyn TermExtractor>,
}

impl SuggestionEngine {
    pub fn new(store: Arc<dyn CatalogStore>, extractor: Arc<dyn TermExtractor>) -> Self {
        Self { store, extractor }
    }

    /// Terms from the extractor, or the whitespace split when it finds none.
    pub fn candidate_terms(&self, fragment: &str) -> Result<Vec<String>, CatalogError> {
        let terms = self.extractor.extract(fragment)?;
        if !terms.is_empty() {
            return Ok(terms);
        }
        debug!(extractor = self.extractor.name(), "no tagged terms, splitting on whitespace");
        Ok(WhitespaceSplitter.extract(fragment)?)
    }

    /// Up to [`SUGGESTION_LIMIT`] display strings for `fragment`. Never fails.
    pub async fn suggest(&self, fragment: &str) -> Vec<String> {
        if fragment.trim().is_empty() {
            return Vec::new();
        }
        match self.try_suggest(fragment).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(error = %e, store = self.store.name(), "suggestion lookup failed");
                Vec::new()
            }
        }
    }

    async fn try_suggest(&self, fragment: &str) -> Result<Vec<String>, CatalogError> {
        let terms = self.candidate_terms(fragment)?;
        debug!(?terms, "suggestion terms");
        let predicate = suggestion_predicate(&terms);
        let rows = self.store.find(&predicate, Some(SUGGESTION_LIMIT)).await?;
        Ok(rows.iter().map(format_suggestion).collect())
    }
}

impl std::fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field("store", &self.store.name())
            .field("extractor", &self.extractor.name())
            .finish()
    }
}
