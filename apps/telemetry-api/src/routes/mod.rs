pub mod health;
pub mod telemetry;

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(telemetry::router())
        .merge(crate::gateway::server::router())
        .merge(crate::ingest::router())
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        telemetry::ingest_telemetry,
    ),
    components(
        schemas(
            crate::error::ApiErrorBody,
            crate::error::ApiErrorDetail,
            crate::error::FieldError,
            odyssey_common::TelemetrySample,
            crate::sink::ForwardingStats,
            health::HealthResponse,
            telemetry::IngestResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Telemetry", description = "Sample ingestion"),
    )
)]
pub struct ApiDoc;
