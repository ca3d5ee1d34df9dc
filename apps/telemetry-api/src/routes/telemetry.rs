//! HTTP ingestion of single samples.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::post;
use axum::{Json, Router};
use odyssey_common::TelemetrySample;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorBody};
use crate::ingest;
use crate::AppState;

/// Largest accepted sample body.
const MAX_SAMPLE_BYTES: usize = 1_048_576;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/telemetry", post(ingest_telemetry))
        .layer(DefaultBodyLimit::max(MAX_SAMPLE_BYTES))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub status: String,
    /// Dashboards the sample was queued for.
    pub delivered: usize,
}

// ---------------------------------------------------------------------------
// POST /telemetry
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/telemetry",
    tag = "Telemetry",
    request_body = TelemetrySample,
    responses(
        (status = 200, description = "Sample accepted", body = IngestResponse),
        (status = 400, description = "Malformed or invalid sample", body = ApiErrorBody),
    ),
)]
pub async fn ingest_telemetry(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IngestResponse>, ApiError> {
    let sample = TelemetrySample::decode(&body)?;
    let report = ingest::dispatch(&state, sample);
    Ok(Json(IngestResponse {
        status: "ok".to_string(),
        delivered: report.delivered,
    }))
}
