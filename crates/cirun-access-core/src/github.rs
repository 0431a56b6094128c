use crate::config::Config;
use crate::error::{AccessError, Result};
use crate::registry;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("cirun-access/", env!("CARGO_PKG_VERSION"));

/// Pre-flight existence checker for feedstock repositories. Read-only: a
/// failed check has no side effects anywhere.
pub struct RepoChecker {
    client: reqwest::blocking::Client,
    api_url: String,
    org: String,
    token: Option<String>,
}

impl RepoChecker {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_url: cfg.api_url.trim_end_matches('/').to_string(),
            org: cfg.org.clone(),
            token: cfg.token.clone(),
        })
    }

    /// Verify that `<org>/<feedstock>-feedstock` exists on the remote host.
    ///
    /// Any non-200 status means the repository is absent (the API answers 404
    /// for private repositories too, which is the right outcome here). A
    /// request that cannot complete at all surfaces as a transport error.
    pub fn repo_exists(&self, feedstock: &str) -> Result<()> {
        let repo = registry::feedstock_repo_name(feedstock);
        let url = format!("{}/repos/{}/{}", self.api_url, self.org, repo);
        debug!("checking {url}");
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AccessError::RepoNotFound {
                org: self.org.clone(),
                repo,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
