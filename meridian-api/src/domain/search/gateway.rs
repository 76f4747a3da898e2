//! Unified search gateway: fans out to the entity searchers, scores and
//! merges their results, and paginates the ranked set.

use super::scoring::ScoreWeights;
use super::traits::{EntitySearcher, Result};
use super::types::{
    Breakdown, CredentialFilter, CredentialRecord, EntityKind, InsightFilter, InsightRecord,
    Matched, SearchHit, SearchScope,
};

/// Returned with an empty result set when the unified query is blank.
pub const EMPTY_QUERY_MESSAGE: &str = "Enter a search term to see results.";

/// Returned when a standalone insights query is below the minimum length.
pub const MIN_LENGTH_MESSAGE: &str = "Please enter at least 2 characters to search.";

/// Configuration for the search gateway.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Page size when the request does not specify one.
    pub default_limit: u32,
    /// Hard cap on the page size a request may ask for.
    pub max_limit: u32,
    /// Minimum trimmed query length for the standalone insights search.
    pub min_query_length: usize,
    /// Per-field relevance weights.
    pub weights: ScoreWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
            min_query_length: 2,
            weights: ScoreWeights::default(),
        }
    }
}

/// One page of unified results, with pre-pagination counts.
#[derive(Debug, Clone)]
pub struct UnifiedPage {
    pub hits: Vec<SearchHit>,
    /// Combined match count across the invoked collections.
    pub total: usize,
    pub breakdown: Breakdown,
    /// Guidance for the no-query state; `None` on a real search.
    pub message: Option<&'static str>,
}

impl UnifiedPage {
    fn empty(message: &'static str) -> Self {
        Self {
            hits: Vec::new(),
            total: 0,
            breakdown: Breakdown::default(),
            message: Some(message),
        }
    }
}

/// One page of a single collection's results.
#[derive(Debug, Clone)]
pub struct EntityPage<T> {
    pub rows: Vec<T>,
    pub total: usize,
    pub message: Option<&'static str>,
}

impl<T> EntityPage<T> {
    fn empty(message: &'static str) -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
            message: Some(message),
        }
    }
}

/// Visible-record counts per collection.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct SearchStats {
    pub total: i64,
    pub insights: i64,
    pub credentials: i64,
}

/// Fans out a free-text query to one or both entity searchers, scores every
/// row with the configured weights, merges, ranks, and paginates.
///
/// # Type Parameters
///
/// * `I` - insight searcher implementation
/// * `C` - credential searcher implementation
///
/// The search path is read-only; a failure in one collection during an
/// `all`-scope search is logged and degraded to an empty contribution
/// rather than failing the whole request.
pub struct SearchGateway<I, C>
where
    I: EntitySearcher<Record = InsightRecord, Filter = InsightFilter>,
    C: EntitySearcher<Record = CredentialRecord, Filter = CredentialFilter>,
{
    insights: I,
    credentials: C,
    config: SearchConfig,
}

impl<I, C> SearchGateway<I, C>
where
    I: EntitySearcher<Record = InsightRecord, Filter = InsightFilter>,
    C: EntitySearcher<Record = CredentialRecord, Filter = CredentialFilter>,
{
    pub fn new(insights: I, credentials: C, config: SearchConfig) -> Self {
        Self {
            insights,
            credentials,
            config,
        }
    }

    pub fn with_defaults(insights: I, credentials: C) -> Self {
        Self::new(insights, credentials, SearchConfig::default())
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Clamp pagination parameters to sane bounds.
    fn normalize(&self, page: u32, limit: u32) -> (u32, u32) {
        (page.max(1), limit.clamp(1, self.config.max_limit))
    }

    /// Unified search across the collections selected by `scope`.
    ///
    /// A blank query is a valid "no search yet" state: it returns an empty
    /// page with a guidance message without touching the store.
    pub async fn search_unified(
        &self,
        query: &str,
        scope: SearchScope,
        page: u32,
        limit: u32,
    ) -> Result<UnifiedPage> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(UnifiedPage::empty(EMPTY_QUERY_MESSAGE));
        }
        let (page, limit) = self.normalize(page, limit);

        let (insights, credentials) = match scope {
            SearchScope::All => {
                let insight_filter = InsightFilter::default();
                let credential_filter = CredentialFilter::default();
                let (insights, credentials) = tokio::join!(
                    self.insights.search(trimmed, &insight_filter),
                    self.credentials.search(trimmed, &credential_filter),
                );
                // Partial-result policy: only fail when every invoked
                // collection failed.
                match (insights, credentials) {
                    (Err(ie), Err(_ce)) => return Err(ie),
                    (insights, credentials) => (
                        insights.unwrap_or_else(|e| {
                            tracing::error!("degrading {} to empty: {e}", EntityKind::Insight);
                            Matched::empty()
                        }),
                        credentials.unwrap_or_else(|e| {
                            tracing::error!("degrading {} to empty: {e}", EntityKind::Credential);
                            Matched::empty()
                        }),
                    ),
                }
            }
            SearchScope::Insights => (
                self.insights
                    .search(trimmed, &InsightFilter::default())
                    .await?,
                Matched::empty(),
            ),
            SearchScope::Credentials => (
                Matched::empty(),
                self.credentials
                    .search(trimmed, &CredentialFilter::default())
                    .await?,
            ),
        };

        let breakdown = Breakdown {
            insights: insights.total,
            credentials: credentials.total,
        };
        let total = breakdown.insights + breakdown.credentials;

        let needle = trimmed.to_lowercase();
        let weights = &self.config.weights;
        let mut hits: Vec<SearchHit> = Vec::with_capacity(total);
        hits.extend(insights.rows.into_iter().map(|r| {
            let score = weights.score_insight(&r, &needle);
            SearchHit::insight(r, score)
        }));
        hits.extend(credentials.rows.into_iter().map(|r| {
            let score = weights.score_credential(&r, &needle);
            SearchHit::credential(r, score)
        }));

        // Stable sort: equal scores keep concatenation order (insights
        // before credentials), which tests rely on for reproducibility.
        hits.sort_by(|a, b| b.score.cmp(&a.score));

        Ok(UnifiedPage {
            hits: Matched::new(hits).into_page(page, limit),
            total,
            breakdown,
            message: None,
        })
    }

    /// Standalone insights search. Queries shorter than the configured
    /// minimum (after trimming) never reach the store and answer with a
    /// hint message instead.
    pub async fn search_insights(
        &self,
        query: &str,
        filter: &InsightFilter,
        page: u32,
        limit: u32,
    ) -> Result<EntityPage<InsightRecord>> {
        let trimmed = query.trim();
        if trimmed.chars().count() < self.config.min_query_length {
            return Ok(EntityPage::empty(MIN_LENGTH_MESSAGE));
        }
        let (page, limit) = self.normalize(page, limit);

        let matched = self.insights.search(trimmed, filter).await?;
        let total = matched.total;
        Ok(EntityPage {
            rows: matched.into_page(page, limit),
            total,
            message: None,
        })
    }

    /// Standalone credentials search. A blank query browses every active
    /// credential, which makes the exact-match filters usable on their own.
    pub async fn search_credentials(
        &self,
        query: &str,
        filter: &CredentialFilter,
        page: u32,
        limit: u32,
    ) -> Result<EntityPage<CredentialRecord>> {
        let (page, limit) = self.normalize(page, limit);

        let matched = self.credentials.search(query.trim(), filter).await?;
        let total = matched.total;
        Ok(EntityPage {
            rows: matched.into_page(page, limit),
            total,
            message: None,
        })
    }

    /// Visible-record counts per collection.
    pub async fn stats(&self) -> Result<SearchStats> {
        let (insights, credentials) =
            tokio::join!(self.insights.count(), self.credentials.count());
        let (insights, credentials) = (insights?, credentials?);
        Ok(SearchStats {
            total: insights + credentials,
            insights,
            credentials,
        })
    }
}

/// `ceil(total / limit)`, with 0 pages for an empty result set.
pub fn total_pages(total: usize, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit as usize) as u32
}
