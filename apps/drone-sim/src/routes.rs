//! The drone's own command endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use odyssey_common::command::verbs;
use odyssey_common::DroneCommand;
use serde::Serialize;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/command", post(command))
        .route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct CommandAck {
    pub status: String,
    pub message: String,
}

impl CommandAck {
    fn ok(message: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            StatusCode::OK,
            Json(Self {
                status: "ok".to_string(),
                message: message.into(),
            }),
        )
    }

    fn error(message: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                status: "error".to_string(),
                message: message.into(),
            }),
        )
    }
}

async fn command(
    State(state): State<AppState>,
    body: Result<Json<DroneCommand>, JsonRejection>,
) -> (StatusCode, Json<CommandAck>) {
    let Ok(Json(cmd)) = body else {
        tracing::warn!("invalid command payload");
        return CommandAck::error("Invalid command payload");
    };

    match cmd.command.as_str() {
        verbs::RETURN_TO_BASE => {
            state.drone.lock().return_to_base();
            tracing::info!(drone_id = %state.config.drone_id, "returning to base");
            CommandAck::ok("Command received: RETURN_TO_BASE")
        }
        verbs::PING => {
            tracing::info!(drone_id = %state.config.drone_id, "ping");
            CommandAck::ok("Command received: PING")
        }
        other => {
            tracing::warn!(command = %other, "unknown command");
            CommandAck::error("Unknown command")
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    #[serde(rename = "droneId")]
    drone_id: String,
    state: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = state.drone.lock().status;
    Json(HealthResponse {
        status: "ok".to_string(),
        drone_id: state.config.drone_id.clone(),
        state: status.as_str(),
    })
}
