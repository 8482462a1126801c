//! HTTP router construction.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::state::AppState;

/// Build the application router. CORS is permissive — the dashboard
/// polls from a different origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/stats", get(api::stats))
        .route("/api/announcements", get(api::announcements_list))
        .route("/api/ingest", get(api::ingest_trigger))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
