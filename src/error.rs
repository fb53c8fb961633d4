//! Error taxonomy for relay requests.
//!
//! Every rejection surfaces as a JSON body `{status, message, ...}` with the
//! HTTP status code mirroring the `status` field.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The ways a relay request can fail.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Deployment misconfiguration, surfaced per request.
    #[error("JENKINS_URL environment variable is not set")]
    JenkinsUrlNotConfigured,

    #[error("No \"payload\" POST parameter supplied")]
    PayloadMissing,

    #[error("Error encountered when parsing payload JSON")]
    PayloadParse(#[from] serde_json::Error),

    #[error("No \"ref\" supplied in payload")]
    RefMissing,

    #[error("Invalid format for \"ref\" in payload: should be \"refs/heads/BRANCHNAME\"")]
    RefInvalid,

    #[error("No \"{0}\" query parameter supplied")]
    QueryParamMissing(&'static str),

    /// Jenkins answered with a non-success status.
    #[error("Error communicating with Jenkins")]
    UpstreamRejected { status: u16, body: String },

    /// The request to Jenkins never completed (timeout, connection refused).
    #[error("Error communicating with Jenkins: {0}")]
    UpstreamUnreachable(#[from] reqwest::Error),
}

/// Helper type for Results that use RelayError.
pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    /// HTTP status mirrored into the JSON `status` field.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::UpstreamRejected { .. } | RelayError::UpstreamUnreachable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut body = json!({
            "status": status.as_u16(),
            "message": self.to_string(),
        });

        // Upstream rejections carry the Jenkins response for diagnosis.
        if let RelayError::UpstreamRejected {
            status: upstream_status,
            body: upstream_body,
        } = &self
        {
            body["upstream_status"] = json!(upstream_status);
            body["upstream_response_body"] = json!(upstream_body);
        }

        (status, Json(body)).into_response()
    }
}
