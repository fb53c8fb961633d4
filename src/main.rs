use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use jenkins_webhook_relay::config::RelayConfig;
use jenkins_webhook_relay::jenkins::JenkinsClient;
use jenkins_webhook_relay::{AppState, router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Console logging honoring the `DEBUG` toggle, with `RUST_LOG` taking
/// precedence when set.
fn init_tracing(debug: bool) {
    let default_directive = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = RelayConfig::from_env();
    init_tracing(config.debug);

    if !config.jenkins_url_configured() {
        warn!("JENKINS_URL is not set; build requests will be rejected until it is configured");
    }

    let bind_address = config.bind_address();
    let state = Arc::new(AppState {
        config,
        jenkins: JenkinsClient::new(),
        start_time: Instant::now(),
        started_at: Utc::now(),
    });

    let app = router(state);

    info!("Listening on {}", bind_address);
    let listener = tokio::net::TcpListener::bind(bind_address).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
