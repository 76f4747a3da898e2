//! PostgreSQL-backed entity searchers.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::search::scoring::{like_pattern, sanitize_query};
use crate::domain::search::traits::{EntitySearcher, Result, SearchError};
use crate::domain::search::types::{
    CredentialFilter, CredentialRecord, EntityKind, InsightFilter, InsightRecord, Matched,
};

/// Searcher over the `insights` table.
///
/// Free text matches any of title/excerpt/content/author, case-insensitive;
/// only published rows are visible. Rows come back newest-first so the
/// standalone insights endpoint can slice them directly.
#[derive(Clone)]
pub struct PgInsightSearcher {
    pool: PgPool,
}

impl PgInsightSearcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitySearcher for PgInsightSearcher {
    type Record = InsightRecord;
    type Filter = InsightFilter;

    fn entity(&self) -> EntityKind {
        EntityKind::Insight
    }

    async fn search(&self, query: &str, filter: &InsightFilter) -> Result<Matched<InsightRecord>> {
        let pattern = like_pattern(&sanitize_query(query));

        let rows = sqlx::query_as::<_, InsightRecord>(
            r#"
            SELECT id, title, excerpt, content, author, is_published, published_date, image_url
            FROM insights
            WHERE is_published = TRUE
              AND (title ILIKE $1 OR excerpt ILIKE $1 OR content ILIKE $1 OR author ILIKE $1)
              AND ($2::timestamptz IS NULL OR published_date >= $2)
              AND ($3::timestamptz IS NULL OR published_date <= $3)
            ORDER BY published_date DESC
            "#,
        )
        .bind(&pattern)
        .bind(filter.published_after)
        .bind(filter.published_before)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SearchError::from_sqlx(EntityKind::Insight, e))?;

        Ok(Matched::new(rows))
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM insights WHERE is_published = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| SearchError::from_sqlx(EntityKind::Insight, e))
    }
}

/// Searcher over the `credentials` table.
///
/// Free text matches title/category; the optional type and category filters
/// are exact matches, independent of the free-text predicate. Ordered by
/// `sort_order`, newest creation first as the tiebreak.
#[derive(Clone)]
pub struct PgCredentialSearcher {
    pool: PgPool,
}

impl PgCredentialSearcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitySearcher for PgCredentialSearcher {
    type Record = CredentialRecord;
    type Filter = CredentialFilter;

    fn entity(&self) -> EntityKind {
        EntityKind::Credential
    }

    async fn search(
        &self,
        query: &str,
        filter: &CredentialFilter,
    ) -> Result<Matched<CredentialRecord>> {
        let pattern = like_pattern(&sanitize_query(query));

        let rows = sqlx::query_as::<_, CredentialRecord>(
            r#"
            SELECT id, title, category, credential_type, is_active, sort_order, created_at
            FROM credentials
            WHERE is_active = TRUE
              AND (title ILIKE $1 OR category ILIKE $1)
              AND ($2::text IS NULL OR credential_type = $2)
              AND ($3::text IS NULL OR category = $3)
            ORDER BY sort_order ASC, created_at DESC
            "#,
        )
        .bind(&pattern)
        .bind(filter.credential_type.as_deref())
        .bind(filter.category.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SearchError::from_sqlx(EntityKind::Credential, e))?;

        Ok(Matched::new(rows))
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM credentials WHERE is_active = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| SearchError::from_sqlx(EntityKind::Credential, e))
    }
}
