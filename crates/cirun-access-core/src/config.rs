/// Organization the feedstocks live under when nothing else is configured.
pub const DEFAULT_ORG: &str = "conda-forge";

/// Clone host; GitHub Actions exports the same value as `GITHUB_SERVER_URL`.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// REST API endpoint; GitHub Actions exports the same value as
/// `GITHUB_API_URL`.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Runtime settings threaded into every component that talks to the outside
/// world. Environment variables are read once at the CLI boundary, never from
/// inside the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub organization hosting the feedstock repositories.
    pub org: String,
    /// Base URL feedstock clone URLs are built from.
    pub server_url: String,
    /// Base URL for repository existence checks.
    pub api_url: String,
    /// Optional API token; unauthenticated requests work but are rate-limited.
    pub token: Option<String>,
}

impl Config {
    pub fn new(org: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ORG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_github_dot_com() {
        let cfg = Config::default();
        assert_eq!(cfg.org, "conda-forge");
        assert_eq!(cfg.server_url, "https://github.com");
        assert_eq!(cfg.api_url, "https://api.github.com");
        assert!(cfg.token.is_none());
    }
}
