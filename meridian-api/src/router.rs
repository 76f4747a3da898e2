use axum::{http::Method, routing::get, Router};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::Settings, domain::search::SearchConfig, routes};

pub fn create(connection_pool: PgPool, config: Settings) -> Router<()> {
    let base_app = Router::new()
        .route("/", get(|| async { "Meridian content API" }))
        .nest("/search", routes::search::router());

    let app_state = AppState::new(connection_pool, SearchConfig::default());

    // The search surface is read-only, so only GET crosses the CORS fence.
    let site_url = config.application.site_url.clone();
    let allowed_suffix = config.application.cors_allowed_origin_suffix.clone();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(["content-type".parse().unwrap()])
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            let origin_str = origin.to_str().unwrap_or_default();
            if origin_str == site_url {
                return true;
            }
            if let Some(ref suffix) = allowed_suffix {
                return origin_str.starts_with("https://") && origin_str.ends_with(suffix.as_str());
            }
            false
        }));

    base_app
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
