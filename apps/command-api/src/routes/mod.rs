pub mod commands;
pub mod drones;
pub mod health;

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api", drones::router().merge(commands::router()))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        drones::register_drone,
        drones::list_drones,
        commands::send_command,
    ),
    components(
        schemas(
            crate::error::ApiErrorBody,
            crate::error::ApiErrorDetail,
            crate::error::FieldError,
            crate::directory::DirectoryEntry,
            odyssey_common::RegisterRequest,
            odyssey_common::CommandRequest,
            odyssey_common::CommandResponse,
            health::HealthResponse,
            drones::RegisterResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Drones", description = "Drone directory"),
        (name = "Commands", description = "Command routing"),
    )
)]
pub struct ApiDoc;
