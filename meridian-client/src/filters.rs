//! Filter strategies for the three search surfaces.
//!
//! The controller is generic over one of these; the strategy decides which
//! endpoint the surface talks to and which extra query parameters it adds.

use crate::types::SearchScope;

pub trait FilterStrategy {
    fn endpoint(&self) -> &'static str;
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Insights-only search; contributes no extra parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightSearch;

impl FilterStrategy for InsightSearch {
    fn endpoint(&self) -> &'static str {
        "/search/insights"
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Credentials-only search with optional exact-match refinements.
#[derive(Debug, Clone, Default)]
pub struct CredentialSearch {
    pub credential_type: Option<String>,
    pub category: Option<String>,
}

impl FilterStrategy for CredentialSearch {
    fn endpoint(&self) -> &'static str {
        "/search/credentials"
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(credential_type) = &self.credential_type {
            pairs.push(("type", credential_type.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs
    }
}

/// Unified search across both collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnifiedSearch {
    pub scope: SearchScope,
}

impl FilterStrategy for UnifiedSearch {
    fn endpoint(&self) -> &'static str {
        "/search"
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("type", self.scope.to_string())]
    }
}
