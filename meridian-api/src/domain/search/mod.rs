//! Unified content search over insights and credentials.
//!
//! The two site collections are queried through a shared abstraction:
//!
//! - [`EntitySearcher`] - per-collection predicate builders (Postgres, mocks)
//! - [`SearchGateway`] - fan-out, weighted scoring, merge, pagination
//! - [`ScoreWeights`] - the per-field ranking policy, injectable for tests
//!
//! # Example
//!
//! ```ignore
//! use meridian_api::domain::search::{SearchConfig, SearchGateway, SearchScope};
//! use meridian_api::domain::search::searcher::{PgCredentialSearcher, PgInsightSearcher};
//!
//! let gateway = SearchGateway::new(
//!     PgInsightSearcher::new(pool.clone()),
//!     PgCredentialSearcher::new(pool),
//!     SearchConfig::default(),
//! );
//!
//! let page = gateway.search_unified("growth strategy", SearchScope::All, 1, 10).await?;
//! ```
//!
//! Ranking is a fixed weighted-substring policy (exact title beats title
//! substring beats body/author/category matches); results are merged across
//! collections, stable-sorted by score, and sliced into pages. The search
//! path never mutates the collections.

mod gateway;
mod scoring;
mod traits;
mod types;

pub mod searcher;

pub use gateway::{
    total_pages, EntityPage, SearchConfig, SearchGateway, SearchStats, UnifiedPage,
    EMPTY_QUERY_MESSAGE, MIN_LENGTH_MESSAGE,
};
pub use scoring::ScoreWeights;
pub use traits::{EntitySearcher, Result, SearchError};
pub use types::{
    Breakdown, CredentialFilter, CredentialRecord, EntityKind, InsightFilter, InsightRecord,
    Matched, SearchHit, SearchScope,
};
