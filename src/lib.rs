//! Jenkins webhook relay.
//!
//! Receives push webhooks, extracts the pushed branch, and forwards a
//! build-trigger request to a configured Jenkins server, translating the
//! outcome into a JSON response.

pub mod config;
pub mod error;
pub mod handlers;
pub mod jenkins;
pub mod payload;

use std::sync::Arc;
use std::time::Instant;

use axum::{Router, routing};
use chrono::{DateTime, Utc};

use crate::config::RelayConfig;
use crate::jenkins::JenkinsClient;

/// Shared server state, built once in `main`.
pub struct AppState {
    pub config: RelayConfig,
    pub jenkins: JenkinsClient,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

pub type SharedState = Arc<AppState>;

/// Builds the relay's routes.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", routing::get(handlers::root))
        .route("/build", routing::post(handlers::trigger_build))
        .route("/status", routing::get(handlers::status))
        .with_state(state)
}
