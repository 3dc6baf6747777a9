// ABOUTME: TrunkConfig - connection settings for the Trunk merge queue API.
// ABOUTME: Loaded from TRUNK_* environment variables or built programmatically.

use std::fmt;
use std::time::Duration;

use crate::error::MergeQueueError;

pub const DEFAULT_API_URL: &str = "https://api.trunk.io/v1";
pub const DEFAULT_HOST: &str = "github.com";
pub const DEFAULT_TARGET_BRANCH: &str = "main";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the Trunk merge queue API.
#[derive(Clone)]
pub struct TrunkConfig {
    pub api_token: String,
    pub api_url: String,
    pub host: String,
    pub owner: String,
    pub name: String,
    pub target_branch: String,
    pub timeout: Duration,
}

impl TrunkConfig {
    /// Create a config for `repo` given as `owner/name`, with defaults for everything else.
    pub fn new(api_token: impl Into<String>, repo: &str) -> Result<Self, MergeQueueError> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(MergeQueueError::NotConfigured(
                "API token is empty".to_string(),
            ));
        }
        let (owner, name) = parse_repo(repo)?;
        Ok(Self {
            api_token,
            api_url: DEFAULT_API_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            owner,
            name,
            target_branch: DEFAULT_TARGET_BRANCH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, MergeQueueError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MergeQueueError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values, as left behind by `.env` templates, count as unset.
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = lookup("TRUNK_API_TOKEN").ok_or_else(|| {
            MergeQueueError::NotConfigured(
                "TRUNK_API_TOKEN environment variable not set".to_string(),
            )
        })?;
        let repo = lookup("TRUNK_REPO").ok_or_else(|| {
            MergeQueueError::NotConfigured("TRUNK_REPO environment variable not set".to_string())
        })?;

        let mut config = Self::new(token, &repo)?;
        if let Some(host) = lookup("TRUNK_REPO_HOST") {
            config = config.with_host(host);
        }
        if let Some(branch) = lookup("TRUNK_TARGET_BRANCH") {
            config = config.with_target_branch(branch);
        }
        if let Some(url) = lookup("TRUNK_API_URL") {
            config = config.with_api_url(url);
        }
        if let Some(secs) = lookup("TRUNK_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                MergeQueueError::NotConfigured(format!(
                    "TRUNK_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    secs
                ))
            })?;
            if secs == 0 {
                return Err(MergeQueueError::NotConfigured(
                    "TRUNK_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Set the VCS host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the default target branch.
    pub fn with_target_branch(mut self, branch: impl Into<String>) -> Self {
        self.target_branch = branch.into();
        self
    }

    /// Set the API base URL. Trailing slashes are dropped.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for TrunkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrunkConfig")
            .field("api_token", &"***")
            .field("api_url", &self.api_url)
            .field("host", &self.host)
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("target_branch", &self.target_branch)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_repo(repo: &str) -> Result<(String, String), MergeQueueError> {
    match repo.trim().split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(MergeQueueError::NotConfigured(format!(
            "repository must be 'owner/name', got '{}'",
            repo
        ))),
    }
}
