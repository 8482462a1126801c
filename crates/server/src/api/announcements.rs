//! Read API: the polling dashboard's only entry point.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use filings_core::AnnouncementRecord;

use crate::state::AppState;

use super::ingest_err;

/// GET /api/announcements — every stored record, newest filing first.
/// An empty store is an empty array, not an error.
pub async fn announcements_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AnnouncementRecord>>, (StatusCode, Json<Value>)> {
    let records = state.store.fetch_all().await.map_err(ingest_err)?;
    Ok(Json(records))
}
