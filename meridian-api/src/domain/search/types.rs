//! Core types for the search domain.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Entity type tag attached to every unified search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Insight,
    Credential,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Insight => write!(f, "insight"),
            EntityKind::Credential => write!(f, "credential"),
        }
    }
}

/// Which collections a unified search fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    #[default]
    All,
    Insights,
    Credentials,
}

impl SearchScope {
    pub fn includes(self, kind: EntityKind) -> bool {
        match self {
            SearchScope::All => true,
            SearchScope::Insights => kind == EntityKind::Insight,
            SearchScope::Credentials => kind == EntityKind::Credential,
        }
    }
}

impl std::fmt::Display for SearchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchScope::All => write!(f, "all"),
            SearchScope::Insights => write!(f, "insights"),
            SearchScope::Credentials => write!(f, "credentials"),
        }
    }
}

/// A published article row, read-only from the search path's perspective.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InsightRecord {
    pub id: i32,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    /// Gates visibility; only published insights are searchable.
    pub is_published: bool,
    /// Ordering key and optional range-filter target.
    #[serde(with = "time::serde::rfc3339")]
    pub published_date: OffsetDateTime,
    pub image_url: Option<String>,
}

/// A case-study blurb row, tagged by industry/service type.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: i32,
    pub title: String,
    pub category: Option<String>,
    /// "Industry" or "Service".
    #[serde(rename = "type")]
    pub credential_type: Option<String>,
    /// Gates visibility; only active credentials are searchable.
    pub is_active: bool,
    /// Primary ordering key within the collection.
    pub sort_order: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A scored, type-tagged row in a unified search response.
///
/// Carries the union of both record shapes; which optional fields are
/// populated follows from `kind`. The score is recomputed per query and
/// never cached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: i32,
    #[serde(rename = "_type")]
    pub kind: EntityKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub published_date: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(rename = "_searchScore")]
    pub score: i32,
}

impl SearchHit {
    pub fn insight(record: InsightRecord, score: i32) -> Self {
        Self {
            id: record.id,
            kind: EntityKind::Insight,
            title: record.title,
            excerpt: record.excerpt,
            content: record.content,
            author: record.author,
            image_url: record.image_url,
            published_date: Some(record.published_date),
            category: None,
            credential_type: None,
            sort_order: None,
            score,
        }
    }

    pub fn credential(record: CredentialRecord, score: i32) -> Self {
        Self {
            id: record.id,
            kind: EntityKind::Credential,
            title: record.title,
            excerpt: None,
            content: None,
            author: None,
            image_url: None,
            published_date: None,
            category: record.category,
            credential_type: record.credential_type,
            sort_order: Some(record.sort_order),
            score,
        }
    }
}

/// The full matching set for one collection, before any pagination.
#[derive(Debug, Clone, Default)]
pub struct Matched<T> {
    pub rows: Vec<T>,
    /// Pre-pagination count, i.e. `rows.len()` at construction time.
    pub total: usize,
}

impl<T> Matched<T> {
    pub fn new(rows: Vec<T>) -> Self {
        let total = rows.len();
        Self { rows, total }
    }

    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
        }
    }

    /// Slice out one page: skip `(page - 1) * limit`, take `limit`.
    pub fn into_page(self, page: u32, limit: u32) -> Vec<T> {
        let offset = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
        self.rows
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect()
    }
}

/// Optional refinements for the insight searcher.
#[derive(Debug, Clone, Default)]
pub struct InsightFilter {
    pub published_after: Option<OffsetDateTime>,
    pub published_before: Option<OffsetDateTime>,
}

/// Optional exact-match refinements for the credential searcher,
/// independent of the free-text predicate.
#[derive(Debug, Clone, Default)]
pub struct CredentialFilter {
    pub credential_type: Option<String>,
    pub category: Option<String>,
}

/// Per-entity match counts within a unified search response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub insights: usize,
    pub credentials: usize,
}
