//! Operator command proxy.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use odyssey_common::{CommandRequest, CommandResponse};

use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/command", post(send_command))
}

// ---------------------------------------------------------------------------
// POST /api/command
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/command",
    tag = "Commands",
    request_body = CommandRequest,
    responses(
        (status = 200, description = "Command forwarded to the drone", body = CommandResponse),
        (status = 400, description = "Malformed command", body = ApiErrorBody),
        (status = 404, description = "Drone not registered", body = ApiErrorBody),
        (status = 502, description = "Drone unreachable or timed out", body = ApiErrorBody),
    ),
)]
pub async fn send_command(
    State(state): State<AppState>,
    body: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let Json(req) = body?;

    // The verb is opaque here; only the drone decides what it means.
    if req.drone_id.trim().is_empty() {
        return Err(ApiError::validation(vec![FieldError {
            field: "droneId".to_string(),
            message: "must not be empty".to_string(),
        }]));
    }

    tracing::info!(drone_id = %req.drone_id, command = %req.command, "received command");

    state.router.route(&req).await?;
    Ok(Json(CommandResponse::sent(&req.command)))
}
