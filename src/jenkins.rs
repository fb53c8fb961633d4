//! Outbound build-trigger calls to Jenkins.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{RelayError, Result};

/// Upstream calls are cut off after this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters for one build trigger, assembled per request.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub job: String,
    pub token: String,
    /// Basic-auth username; `None` disables authentication.
    pub user: Option<String>,
    pub password: String,
    /// Name of the Jenkins build parameter that receives the branch.
    pub param_key: String,
    pub branch: String,
}

/// Thin client for the Jenkins remote-trigger endpoint.
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    http: Client,
}

impl JenkinsClient {
    pub fn new() -> JenkinsClient {
        JenkinsClient {
            http: Client::new(),
        }
    }

    /// Submits `buildWithParameters` for one push.
    ///
    /// Returns `Ok` on any 2xx answer; a non-2xx answer or a transport
    /// failure maps to the upstream error kinds.
    pub async fn trigger_build(&self, base_url: &str, build: &BuildRequest) -> Result<()> {
        let url = build_trigger_url(base_url, &build.job);
        debug!(
            "Submitting build request to {} for branch '{}'",
            url, build.branch
        );

        let mut request = self
            .http
            .get(&url)
            .query(&[
                ("token", build.token.as_str()),
                (build.param_key.as_str(), build.branch.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT);

        if let Some(user) = &build.user {
            request = request.basic_auth(user, Some(&build.password));
        }

        let response = request.send().await?;

        if response.status().is_success() {
            debug!("Build request submitted successfully to {}", url);
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(
                "Failed to submit build request to {}. Upstream status {}, body follows:",
                url, status
            );
            warn!("{}", body);
            Err(RelayError::UpstreamRejected { status, body })
        }
    }
}

impl Default for JenkinsClient {
    fn default() -> JenkinsClient {
        JenkinsClient::new()
    }
}

/// Builds the remote-trigger URL for a job.
fn build_trigger_url(base_url: &str, job: &str) -> String {
    format!("{}/job/{}/buildWithParameters", base_url, job)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_trigger_url() {
        assert_eq!(
            build_trigger_url("https://ci.example.com", "deploy-web"),
            "https://ci.example.com/job/deploy-web/buildWithParameters"
        );
    }
}
