use serde::Deserialize;
use time::OffsetDateTime;

/// Entity tag carried by unified search hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
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

/// Which collections a unified search should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    All,
    Insights,
    Credentials,
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

/// One row of a search response.
///
/// The three endpoints share this shape; which optional fields are populated
/// depends on the endpoint and, for unified hits, on the `_type` tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: i32,
    pub title: String,
    /// Present on unified hits only.
    #[serde(rename = "_type", default)]
    pub kind: Option<EntityKind>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub credential_type: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    /// Relevance weight; only meaningful within the response it came from.
    #[serde(rename = "_searchScore", default)]
    pub score: Option<i32>,
}

/// Per-entity match counts in a unified response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Breakdown {
    pub insights: usize,
    pub credentials: usize,
}

/// A page of results as returned by any of the search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub data: Vec<SearchHit>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub breakdown: Option<Breakdown>,
    /// Guidance for blank or too-short queries.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unified_hit_deserializes() {
        let json = serde_json::json!({
            "id": 4,
            "_type": "credential",
            "title": "Growth Strategy Workshop",
            "category": "Business Strategy",
            "type": "Service",
            "sortOrder": 2,
            "_searchScore": 12
        });

        let hit: SearchHit = serde_json::from_value(json).unwrap();
        assert_eq!(hit.kind, Some(EntityKind::Credential));
        assert_eq!(hit.credential_type.as_deref(), Some("Service"));
        assert_eq!(hit.score, Some(12));
        assert!(hit.excerpt.is_none());
    }

    #[test]
    fn entity_page_tolerates_missing_optionals() {
        let json = serde_json::json!({
            "data": [{"id": 1, "title": "Outlook 2025"}],
            "total": 1,
            "page": 1,
            "limit": 10,
            "totalPages": 1,
            "query": "outlook"
        });

        let page: SearchPage = serde_json::from_value(json).unwrap();
        assert_eq!(page.total, 1);
        assert!(page.breakdown.is_none());
        assert!(page.data[0].kind.is_none());
    }
}
