//! Trait definitions for search domain abstractions.
//!
//! These traits enable dependency injection and easy testing through mocking.

use async_trait::async_trait;

use super::types::{EntityKind, Matched};

/// Error type for search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query text produced a predicate the store rejected.
    #[error("invalid characters in search query")]
    InvalidQuery,

    /// The store failed to execute the read for one collection.
    #[error("{entity} search failed: {reason}")]
    QueryFailed { entity: EntityKind, reason: String },
}

impl SearchError {
    pub fn query_failed(entity: EntityKind, reason: impl std::fmt::Display) -> Self {
        SearchError::QueryFailed {
            entity,
            reason: reason.to_string(),
        }
    }

    /// Classify a store error, keeping the entity context. Postgres syntax
    /// errors (SQLSTATE 42601) surface as `InvalidQuery` so the caller can
    /// answer with a 400 instead of a 500.
    pub fn from_sqlx(entity: EntityKind, err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.code().as_deref() == Some("42601") {
                return SearchError::InvalidQuery;
            }
        }
        Self::query_failed(entity, err)
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// One collection's query builder.
///
/// Implementations translate free text plus a per-entity filter shape into
/// the collection's predicate, apply visibility gating, and return the full
/// matching set with its pre-pagination count. Slicing a page out of the
/// set is the caller's concern, because the unified gateway must merge and
/// re-rank across collections before paginating.
#[async_trait]
pub trait EntitySearcher: Send + Sync {
    type Record: Send;
    type Filter: Default + Send + Sync;

    /// Which collection this searcher reads; used for error context.
    fn entity(&self) -> EntityKind;

    /// Run the collection predicate for `query` and return every match,
    /// in the collection's canonical order.
    async fn search(&self, query: &str, filter: &Self::Filter) -> Result<Matched<Self::Record>>;

    /// Count of visible records in the collection.
    async fn count(&self) -> Result<i64>;
}
