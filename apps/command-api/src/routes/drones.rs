//! Drone registration and directory listing.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use odyssey_common::RegisterRequest;
use serde::Serialize;
use utoipa::ToSchema;

use crate::directory::DirectoryEntry;
use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_drone))
        .route("/drones", get(list_drones))
}

// ---------------------------------------------------------------------------
// POST /api/register
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub status: String,
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Drones",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Drone registered", body = RegisterResponse),
        (status = 400, description = "Invalid registration", body = ApiErrorBody),
    ),
)]
pub async fn register_drone(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let Json(req) = body?;
    validate_registration(&req)?;

    let address = req.address.trim_end_matches('/');
    match state.directory.register(&req.drone_id, address) {
        Some(previous) if previous != address => {
            tracing::info!(drone_id = %req.drone_id, %address, %previous, "drone re-registered at new address");
        }
        _ => {
            tracing::info!(drone_id = %req.drone_id, %address, "registered drone");
        }
    }

    Ok(Json(RegisterResponse {
        status: "registered".to_string(),
    }))
}

fn validate_registration(req: &RegisterRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    if req.drone_id.trim().is_empty() {
        errors.push(FieldError {
            field: "droneId".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    match reqwest::Url::parse(&req.address) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(FieldError {
            field: "address".to_string(),
            message: "must be an absolute http(s) URL".to_string(),
        }),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}

// ---------------------------------------------------------------------------
// GET /api/drones
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/drones",
    tag = "Drones",
    responses(
        (status = 200, description = "Registered drones", body = Vec<DirectoryEntry>),
    ),
)]
pub async fn list_drones(State(state): State<AppState>) -> Json<Vec<DirectoryEntry>> {
    Json(state.directory.list())
}
