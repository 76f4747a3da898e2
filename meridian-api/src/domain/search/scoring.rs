//! Relevance scoring and query-text sanitization.

use super::types::{CredentialRecord, InsightRecord};

/// Per-field score weights for unified search ranking.
///
/// Weights are additive: a record matching several fields accumulates the
/// weight of each. Passed into the gateway at construction time so tests
/// can exercise alternate weightings.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    /// Exact case-insensitive title equality, on top of the substring weight.
    pub title_exact: i32,
    pub title: i32,
    pub excerpt: i32,
    pub content: i32,
    pub author: i32,
    pub category: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            title_exact: 5,
            title: 10,
            excerpt: 3,
            content: 2,
            author: 2,
            category: 2,
        }
    }
}

impl ScoreWeights {
    /// Score an insight against `needle`, which must already be trimmed
    /// and lowercased.
    pub fn score_insight(&self, record: &InsightRecord, needle: &str) -> i32 {
        let mut score = 0;
        let title = record.title.to_lowercase();
        if title == needle {
            score += self.title_exact;
        }
        if title.contains(needle) {
            score += self.title;
        }
        if contains(record.excerpt.as_deref(), needle) {
            score += self.excerpt;
        }
        if contains(record.content.as_deref(), needle) {
            score += self.content;
        }
        if contains(record.author.as_deref(), needle) {
            score += self.author;
        }
        score
    }

    /// Score a credential against `needle` (trimmed, lowercased).
    ///
    /// Credentials only expose title and category, so they structurally cap
    /// out lower than insights for multi-field matches.
    pub fn score_credential(&self, record: &CredentialRecord, needle: &str) -> i32 {
        let mut score = 0;
        let title = record.title.to_lowercase();
        if title == needle {
            score += self.title_exact;
        }
        if title.contains(needle) {
            score += self.title;
        }
        if contains(record.category.as_deref(), needle) {
            score += self.category;
        }
        score
    }
}

fn contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Strip characters that would break a multi-field OR predicate.
/// Commas are replaced with spaces rather than dropped so adjacent terms
/// stay separated.
pub fn sanitize_query(query: &str) -> String {
    query.replace(',', " ").trim().to_string()
}

/// Escape LIKE wildcards in `query` and wrap it for a contains match.
pub fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
