//! Ingestion trigger endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::pipeline;
use crate::state::AppState;

use super::ingest_err;

/// GET /api/ingest — run one full pipeline cycle.
///
/// On failure nothing is committed and the previously stored data stays
/// visible through the read API; the error is status-coded (502 for the
/// upstream, 500 for the store).
pub async fn ingest_trigger(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let inserted = pipeline::run_cycle(&state).await.map_err(ingest_err)?;
    Ok(Json(json!({ "success": true, "inserted": inserted })))
}
