//! Self-registration and the periodic telemetry loop.

use std::time::Duration;

use odyssey_common::RegisterRequest;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::AppState;

const POST_TIMEOUT: Duration = Duration::from_secs(1);

/// Announce this drone's command address to the command service.
pub async fn register(client: &reqwest::Client, state: &AppState) -> Result<(), reqwest::Error> {
    let url = format!("{}/api/register", state.config.command_api_url.trim_end_matches('/'));
    let body = RegisterRequest {
        drone_id: state.config.drone_id.clone(),
        address: state.config.advertise_address.clone(),
    };
    client
        .post(&url)
        .json(&body)
        .timeout(POST_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;
    tracing::info!(
        drone_id = %body.drone_id,
        address = %body.address,
        "registered with command service"
    );
    Ok(())
}

/// Step the simulation and post a sample every interval, forever.
///
/// Delivery failures are logged and the next tick carries on.
pub async fn run(client: reqwest::Client, state: AppState) {
    let mut rng = StdRng::from_entropy();
    let mut ticker = tokio::time::interval(state.config.telemetry_interval);

    loop {
        ticker.tick().await;

        let sample = {
            let mut drone = state.drone.lock();
            drone.step(&mut rng);
            drone.sample(&state.config.drone_id)
        };

        let result = client
            .post(&state.config.telemetry_url)
            .json(&sample)
            .timeout(POST_TIMEOUT)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        match result {
            Ok(_) => tracing::debug!(
                status = %sample.status,
                battery = sample.battery_level,
                "sample sent"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to send sample"),
        }
    }
}
