use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::search::searcher::{PgCredentialSearcher, PgInsightSearcher};
use crate::domain::search::{SearchConfig, SearchGateway};

/// The gateway wired to the Postgres searchers, shared by every request.
pub type PgSearchGateway = SearchGateway<PgInsightSearcher, PgCredentialSearcher>;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
    search: Arc<PgSearchGateway>,
}

impl AppState {
    pub fn new(db_pool: PgPool, search_config: SearchConfig) -> Self {
        let search = SearchGateway::new(
            PgInsightSearcher::new(db_pool.clone()),
            PgCredentialSearcher::new(db_pool.clone()),
            search_config,
        );

        Self {
            db_pool: Arc::new(db_pool),
            search: Arc::new(search),
        }
    }

    pub fn search(&self) -> &PgSearchGateway {
        &self.search
    }
}
