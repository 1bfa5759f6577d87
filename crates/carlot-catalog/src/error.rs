//! Error types for catalog operations.

use thiserror::Error;

/// Errors surfaced by the filter compiler, search service and stores.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A filter value could not be coerced to the attribute's type
    /// (e.g. `seats=5abc`). Raised before the store is touched.
    #[error("invalid value {value:?} for filter `{field}`")]
    InvalidFilterValue { field: String, value: String },

    /// A filter name that is not a catalog attribute, rejected because the
    /// compiler runs with [`UnknownFilterPolicy::Reject`](crate::UnknownFilterPolicy::Reject).
    #[error("unknown filter `{0}`")]
    UnknownFilter(String),

    /// The catalog store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Keyword extraction failed.
    #[error("term extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Catalog store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Keyword extraction errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("input too long: {len} chars, max {max}")]
    InputTooLong { len: usize, max: usize },

    #[error("extraction failed: {0}")]
    Failed(String),
}
