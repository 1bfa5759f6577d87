//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use carlot_catalog::{
    CatalogStore, FilterCompiler, LexiconTagger, SearchService, SuggestionEngine,
    UnknownFilterPolicy,
};

use crate::config::Config;

/// State shared across all HTTP handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Compiles `/car_tb` query strings.
    pub filters: FilterCompiler,
    /// Typeahead for `/cars/suggestions`.
    pub suggestions: SuggestionEngine,
    /// Submit-to-search for `/cars/search`.
    pub search: SearchService,
    store: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn CatalogStore>) -> Self {
        let policy = if config.strict_filters {
            UnknownFilterPolicy::Reject
        } else {
            UnknownFilterPolicy::PassThrough
        };
        Self {
            filters: FilterCompiler::new(policy),
            suggestions: SuggestionEngine::new(store.clone(), Arc::new(LexiconTagger::new())),
            search: SearchService::new(store.clone()).with_airbag_hint(config.search_airbag_hint),
            config: Arc::new(config),
            store,
        }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store.name())
            .finish_non_exhaustive()
    }
}
