//! Health and operational stats endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;

use super::ingest_err;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    // Health stays 200 even when the store is down; the flag carries
    // the database state.
    let database = state.store.count().await.is_ok();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub announcement_count: i64,
    pub classify: bool,
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, (StatusCode, Json<Value>)> {
    let announcement_count = state.store.count().await.map_err(ingest_err)?;
    Ok(Json(StatsResponse {
        announcement_count,
        classify: state.classify,
    }))
}
