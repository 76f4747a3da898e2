//! Entity searcher implementations.

#[cfg(test)]
mod mock;
mod postgres;

#[cfg(test)]
pub use mock::{MockCredentialSearcher, MockInsightSearcher};
pub use postgres::{PgCredentialSearcher, PgInsightSearcher};
