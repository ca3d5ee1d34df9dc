use std::net::SocketAddr;
use std::path::Path;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drone_sim::config::Config;
use drone_sim::{reporter, AppState};

#[tokio::main]
async fn main() {
    // Load .env file (missing is fine, env vars may be set externally)
    if dotenvy::dotenv().is_err() {
        let env_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(env_path);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let port = config.port;
    tracing::info!(
        drone_id = %config.drone_id,
        telemetry_url = %config.telemetry_url,
        advertise = %config.advertise_address,
        "starting drone simulator"
    );

    let state = AppState::new(config);
    let client = reqwest::Client::new();

    {
        let client = client.clone();
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = reporter::register(&client, &state).await {
                tracing::warn!(error = %e, "self-registration failed; commands will not reach this drone");
            }
            reporter::run(client, state).await;
        });
    }

    let app = drone_sim::routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "listening for commands");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
