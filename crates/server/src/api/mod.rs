//! HTTP endpoint modules. Each sub-module owns one responsibility area;
//! the shared error mapper lives here in mod.rs.

mod announcements;
mod health;
mod ingest;

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use filings_core::IngestError;

/// Map an `IngestError` to a status-coded structured error response.
/// Failures are never surfaced as 200-with-error-body.
pub(crate) fn ingest_err(e: IngestError) -> (StatusCode, Json<Value>) {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": e.to_string() })))
}

// ── Re-exports ───────────────────────────────────────────────────
// Preserves flat `api::foo` import paths used by route registration.

pub use announcements::announcements_list;
pub use health::{health, stats};
pub use ingest::ingest_trigger;
