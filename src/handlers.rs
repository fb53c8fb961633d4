//! HTTP handlers for the relay endpoints.

use axum::{
    Form, Json,
    extract::{Query, State as AxumState},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::SharedState;
use crate::error::{RelayError, Result};
use crate::jenkins::BuildRequest;
use crate::payload::PushEvent;

/// Jenkins build parameter that receives the branch when none is named.
const DEFAULT_PARAM_KEY: &str = "BRANCH";

/// Query parameters accepted by POST /build.
///
/// Everything is optional at the type level; the required ones are checked
/// explicitly so a missing parameter maps onto the JSON error surface instead
/// of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct BuildQuery {
    pub jenkins_job: Option<String>,
    pub jenkins_token: Option<String>,
    pub jenkins_user: Option<String>,
    pub jenkins_password: Option<String>,
    pub jenkins_param_key: Option<String>,
}

/// Form body accepted by POST /build.
#[derive(Debug, Deserialize)]
pub struct BuildForm {
    pub payload: Option<String>,
}

/// GET / - service description.
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": 200,
        "message": "Relays push webhooks to Jenkins. POST push payloads to /build \
                    with jenkins_job and jenkins_token query parameters.",
    }))
}

/// GET /status - server status and configuration summary.
pub async fn status(AxumState(state): AxumState<SharedState>) -> Json<Value> {
    Json(json!({
        "server": {
            "name": "jenkins_webhook_relay",
            "version": env!("CARGO_PKG_VERSION"),
            "started_at": state.started_at,
            "uptime_seconds": state.start_time.elapsed().as_secs(),
        },
        "config": {
            "jenkins_url_configured": state.config.jenkins_url_configured(),
            "ignored_branches": state.config.ignore_branches.len(),
        }
    }))
}

/// POST /build - relay a push event to Jenkins.
///
/// Decision sequence: configuration check, payload parse, branch extraction,
/// required parameters, ignore list, deletion, then the upstream call.
pub async fn trigger_build(
    AxumState(state): AxumState<SharedState>,
    Query(params): Query<BuildQuery>,
    Form(form): Form<BuildForm>,
) -> Result<Json<Value>> {
    if !state.config.jenkins_url_configured() {
        return Err(RelayError::JenkinsUrlNotConfigured);
    }

    let raw = form.payload.ok_or(RelayError::PayloadMissing)?;
    let event = PushEvent::parse(&raw)?;
    let branch = event.branch()?.to_string();

    let job = params
        .jenkins_job
        .ok_or(RelayError::QueryParamMissing("jenkins_job"))?;
    let token = params
        .jenkins_token
        .ok_or(RelayError::QueryParamMissing("jenkins_token"))?;

    if state.config.is_ignored(&branch) {
        debug!("Ignoring push on {}", branch);
        return Ok(Json(json!({
            "status": 200,
            "message": format!("Ignoring push on {}", branch),
        })));
    }

    if event.is_deletion() {
        debug!("Ignoring deletion of {}", branch);
        return Ok(Json(json!({
            "status": 200,
            "message": format!("Ignoring deletion of {}", branch),
        })));
    }

    let build = BuildRequest {
        job,
        token,
        // An empty username counts as absent; no auth header is attached.
        user: params.jenkins_user.filter(|u| !u.is_empty()),
        password: params.jenkins_password.unwrap_or_default(),
        param_key: params
            .jenkins_param_key
            .unwrap_or_else(|| DEFAULT_PARAM_KEY.to_string()),
        branch: branch.clone(),
    };

    state
        .jenkins
        .trigger_build(&state.config.jenkins_url, &build)
        .await?;

    info!(
        "Submitted build request for job '{}' on branch '{}'",
        build.job, branch
    );
    Ok(Json(json!({
        "status": 200,
        "message": "Submitted request for build",
    })))
}
