use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    domain::search::{
        total_pages, Breakdown, CredentialFilter, CredentialRecord, InsightFilter, InsightRecord,
        SearchHit, SearchScope, SearchStats,
    },
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(unified_search))
        .route("/insights", get(insight_search))
        .route("/credentials", get(credential_search))
        .route("/stats", get(search_stats))
}

#[derive(Debug, Clone, Deserialize)]
struct UnifiedParams {
    #[serde(default)]
    q: String,
    #[serde(rename = "type", default)]
    scope: SearchScope,
    page: Option<u32>,
    limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UnifiedResponse {
    data: Vec<SearchHit>,
    total: usize,
    page: u32,
    limit: u32,
    total_pages: u32,
    query: String,
    #[serde(rename = "type")]
    scope: SearchScope,
    breakdown: Breakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

#[instrument(name = "GET /search", skip(app_state))]
async fn unified_search(
    State(app_state): State<AppState>,
    Query(params): Query<UnifiedParams>,
) -> Result<Json<UnifiedResponse>, ApiError> {
    let gateway = app_state.search();
    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(gateway.config().default_limit)
        .clamp(1, gateway.config().max_limit);

    let results = gateway
        .search_unified(&params.q, params.scope, page, limit)
        .await?;

    Ok(Json(UnifiedResponse {
        total: results.total,
        total_pages: total_pages(results.total, limit),
        data: results.hits,
        page,
        limit,
        query: params.q,
        scope: params.scope,
        breakdown: results.breakdown,
        message: results.message,
    }))
}

#[derive(Debug, Clone, Deserialize)]
struct InsightParams {
    #[serde(default)]
    q: String,
    page: Option<u32>,
    limit: Option<u32>,
    /// Lower bound on `published_date`, RFC 3339.
    #[serde(default, with = "time::serde::rfc3339::option")]
    from: Option<OffsetDateTime>,
    /// Upper bound on `published_date`, RFC 3339.
    #[serde(default, with = "time::serde::rfc3339::option")]
    to: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsightResponse {
    data: Vec<InsightRecord>,
    total: usize,
    page: u32,
    limit: u32,
    total_pages: u32,
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

#[instrument(name = "GET /search/insights", skip(app_state))]
async fn insight_search(
    State(app_state): State<AppState>,
    Query(params): Query<InsightParams>,
) -> Result<Json<InsightResponse>, ApiError> {
    let gateway = app_state.search();
    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(gateway.config().default_limit)
        .clamp(1, gateway.config().max_limit);

    let filter = InsightFilter {
        published_after: params.from,
        published_before: params.to,
    };
    let results = gateway
        .search_insights(&params.q, &filter, page, limit)
        .await?;

    Ok(Json(InsightResponse {
        total: results.total,
        total_pages: total_pages(results.total, limit),
        data: results.rows,
        page,
        limit,
        query: params.q,
        message: results.message,
    }))
}

#[derive(Debug, Clone, Deserialize)]
struct CredentialParams {
    #[serde(default)]
    q: String,
    #[serde(rename = "type")]
    credential_type: Option<String>,
    category: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
}

/// Echo of the exact-match filters a credential search was run with.
#[derive(Debug, Serialize)]
struct AppliedFilters {
    #[serde(rename = "type")]
    credential_type: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialResponse {
    data: Vec<CredentialRecord>,
    total: usize,
    page: u32,
    limit: u32,
    total_pages: u32,
    query: String,
    filters: AppliedFilters,
}

#[instrument(name = "GET /search/credentials", skip(app_state))]
async fn credential_search(
    State(app_state): State<AppState>,
    Query(params): Query<CredentialParams>,
) -> Result<Json<CredentialResponse>, ApiError> {
    let gateway = app_state.search();
    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(gateway.config().default_limit)
        .clamp(1, gateway.config().max_limit);

    let filter = CredentialFilter {
        credential_type: params.credential_type.clone(),
        category: params.category.clone(),
    };
    let results = gateway
        .search_credentials(&params.q, &filter, page, limit)
        .await?;

    Ok(Json(CredentialResponse {
        total: results.total,
        total_pages: total_pages(results.total, limit),
        data: results.rows,
        page,
        limit,
        query: params.q,
        filters: AppliedFilters {
            credential_type: params.credential_type,
            category: params.category,
        },
    }))
}

#[instrument(name = "GET /search/stats", skip(app_state))]
async fn search_stats(
    State(app_state): State<AppState>,
) -> Result<Json<SearchStats>, ApiError> {
    let stats = app_state.search().stats().await?;
    Ok(Json(stats))
}
