//! In-memory searcher implementations for testing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::search::scoring::sanitize_query;
use crate::domain::search::traits::{EntitySearcher, Result, SearchError};
use crate::domain::search::types::{
    CredentialFilter, CredentialRecord, EntityKind, InsightFilter, InsightRecord, Matched,
};

fn contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Mock insight searcher backed by an in-memory row list.
///
/// Mirrors the Postgres predicate: visibility gating, case-insensitive
/// multi-field contains, newest-first ordering. Supports failure injection
/// and call counting for partial-failure and no-store-call assertions.
#[derive(Clone, Default)]
pub struct MockInsightSearcher {
    rows: Arc<RwLock<Vec<InsightRecord>>>,
    fail: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockInsightSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, rows: Vec<InsightRecord>) -> Self {
        *self.rows.write().unwrap() = rows;
        self
    }

    /// Make every subsequent search fail with a store error.
    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    /// How many times `search` reached this store.
    pub fn search_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntitySearcher for MockInsightSearcher {
    type Record = InsightRecord;
    type Filter = InsightFilter;

    fn entity(&self) -> EntityKind {
        EntityKind::Insight
    }

    async fn search(&self, query: &str, filter: &InsightFilter) -> Result<Matched<InsightRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(SearchError::query_failed(
                EntityKind::Insight,
                "mock store unavailable",
            ));
        }

        let needle = sanitize_query(query).to_lowercase();
        let mut matched: Vec<InsightRecord> = self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.is_published)
            .filter(|r| filter.published_after.is_none_or(|t| r.published_date >= t))
            .filter(|r| filter.published_before.is_none_or(|t| r.published_date <= t))
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || contains(r.excerpt.as_deref(), &needle)
                    || contains(r.content.as_deref(), &needle)
                    || contains(r.author.as_deref(), &needle)
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        Ok(Matched::new(matched))
    }

    async fn count(&self) -> Result<i64> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SearchError::query_failed(
                EntityKind::Insight,
                "mock store unavailable",
            ));
        }
        let count = self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.is_published)
            .count();
        Ok(count as i64)
    }
}

/// Mock credential searcher; same shape as [`MockInsightSearcher`].
#[derive(Clone, Default)]
pub struct MockCredentialSearcher {
    rows: Arc<RwLock<Vec<CredentialRecord>>>,
    fail: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockCredentialSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, rows: Vec<CredentialRecord>) -> Self {
        *self.rows.write().unwrap() = rows;
        self
    }

    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntitySearcher for MockCredentialSearcher {
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
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(SearchError::query_failed(
                EntityKind::Credential,
                "mock store unavailable",
            ));
        }

        let needle = sanitize_query(query).to_lowercase();
        let mut matched: Vec<CredentialRecord> = self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.is_active)
            .filter(|r| {
                filter
                    .credential_type
                    .as_deref()
                    .is_none_or(|t| r.credential_type.as_deref() == Some(t))
            })
            .filter(|r| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| r.category.as_deref() == Some(c))
            })
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || contains(r.category.as_deref(), &needle)
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(Matched::new(matched))
    }

    async fn count(&self) -> Result<i64> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SearchError::query_failed(
                EntityKind::Credential,
                "mock store unavailable",
            ));
        }
        let count = self
            .rows
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.is_active)
            .count();
        Ok(count as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn insight(id: i32, title: &str, published: bool, date: OffsetDateTime) -> InsightRecord {
        InsightRecord {
            id,
            title: title.to_string(),
            excerpt: None,
            content: None,
            author: None,
            is_published: published,
            published_date: date,
            image_url: None,
        }
    }

    fn credential(id: i32, title: &str, sort_order: i32, active: bool) -> CredentialRecord {
        CredentialRecord {
            id,
            title: title.to_string(),
            category: None,
            credential_type: None,
            is_active: active,
            sort_order,
            created_at: datetime!(2024-01-01 00:00 UTC),
        }
    }

    #[tokio::test]
    async fn unpublished_insights_are_invisible() {
        let searcher = MockInsightSearcher::new().with_rows(vec![
            insight(1, "Market Entry", true, datetime!(2024-02-01 00:00 UTC)),
            insight(2, "Market Entry Draft", false, datetime!(2024-03-01 00:00 UTC)),
        ]);

        let matched = searcher
            .search("market", &InsightFilter::default())
            .await
            .unwrap();
        assert_eq!(matched.total, 1);
        assert_eq!(matched.rows[0].id, 1);
    }

    #[tokio::test]
    async fn insights_come_back_newest_first() {
        let searcher = MockInsightSearcher::new().with_rows(vec![
            insight(1, "Outlook 2023", true, datetime!(2023-01-01 00:00 UTC)),
            insight(2, "Outlook 2024", true, datetime!(2024-01-01 00:00 UTC)),
        ]);

        let matched = searcher
            .search("outlook", &InsightFilter::default())
            .await
            .unwrap();
        assert_eq!(
            matched.rows.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![2, 1]
        );
    }

    #[tokio::test]
    async fn date_range_filter_applies() {
        let searcher = MockInsightSearcher::new().with_rows(vec![
            insight(1, "Outlook 2023", true, datetime!(2023-06-01 00:00 UTC)),
            insight(2, "Outlook 2024", true, datetime!(2024-06-01 00:00 UTC)),
        ]);

        let filter = InsightFilter {
            published_after: Some(datetime!(2024-01-01 00:00 UTC)),
            published_before: None,
        };
        let matched = searcher.search("outlook", &filter).await.unwrap();
        assert_eq!(matched.total, 1);
        assert_eq!(matched.rows[0].id, 2);
    }

    #[tokio::test]
    async fn credentials_order_by_sort_order() {
        let searcher = MockCredentialSearcher::new().with_rows(vec![
            credential(1, "Strategy Review", 5, true),
            credential(2, "Strategy Workshop", 1, true),
            credential(3, "Strategy Audit", 1, false),
        ]);

        let matched = searcher
            .search("strategy", &CredentialFilter::default())
            .await
            .unwrap();
        assert_eq!(
            matched.rows.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![2, 1]
        );
    }

    #[tokio::test]
    async fn exact_filters_are_independent_of_free_text() {
        let mut industry = credential(1, "Banking Transformation", 1, true);
        industry.credential_type = Some("Industry".to_string());
        let mut service = credential(2, "Banking Advisory", 2, true);
        service.credential_type = Some("Service".to_string());

        let searcher = MockCredentialSearcher::new().with_rows(vec![industry, service]);

        let filter = CredentialFilter {
            credential_type: Some("Industry".to_string()),
            category: None,
        };
        let matched = searcher.search("banking", &filter).await.unwrap();
        assert_eq!(matched.total, 1);
        assert_eq!(matched.rows[0].id, 1);
    }

    #[tokio::test]
    async fn failure_injection_reports_entity() {
        let searcher = MockCredentialSearcher::new().failing();
        let err = searcher
            .search("anything", &CredentialFilter::default())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("credential search failed"));
    }

    #[tokio::test]
    async fn call_counter_tracks_store_reads() {
        let searcher = MockInsightSearcher::new();
        assert_eq!(searcher.search_calls(), 0);
        searcher
            .search("abc", &InsightFilter::default())
            .await
            .unwrap();
        assert_eq!(searcher.search_calls(), 1);
    }
}
