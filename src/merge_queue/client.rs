// ABOUTME: TrunkClient - MergeQueue implementation over the Trunk merge queue HTTP API.
// ABOUTME: All endpoints are JSON POSTs authenticated with the x-api-token header.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{MergeQueue, Priority, PullRequestStatus, QueueSnapshot, QueueState, TrunkConfig};
use crate::error::MergeQueueError;

const USER_AGENT: &str = concat!("ide-tools/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct Repo<'a> {
    host: &'a str,
    owner: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct PrNumber {
    number: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueueRequest<'a> {
    repo: Repo<'a>,
    target_branch: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestRequest<'a> {
    repo: Repo<'a>,
    pr: PrNumber,
    target_branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateQueueRequest<'a> {
    repo: Repo<'a>,
    target_branch: &'a str,
    state: QueueState,
}

/// Client for the Trunk merge queue API.
#[derive(Debug, Clone)]
pub struct TrunkClient {
    config: TrunkConfig,
    http: reqwest::Client,
}

impl TrunkClient {
    /// Create a client from explicit settings.
    pub fn new(config: TrunkConfig) -> Result<Self, MergeQueueError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { config, http })
    }

    /// Create a client from TRUNK_* environment variables.
    pub fn from_env() -> Result<Self, MergeQueueError> {
        Self::new(TrunkConfig::from_env()?)
    }

    pub fn config(&self) -> &TrunkConfig {
        &self.config
    }

    fn repo(&self) -> Repo<'_> {
        Repo {
            host: &self.config.host,
            owner: &self.config.owner,
            name: &self.config.name,
        }
    }

    async fn post<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<reqwest::Response, MergeQueueError> {
        let url = format!("{}/{}", self.config.api_url, endpoint);
        tracing::debug!(%url, "trunk request");

        let response = self
            .http
            .post(&url)
            .header("x-api-token", &self.config.api_token)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(MergeQueueError::Api {
                status: status.as_u16(),
                message: api_message(&text, status),
            });
        }
        Ok(response)
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<R, MergeQueueError> {
        let text = self.post(endpoint, body).await?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Pull a human message out of an error body, falling back to the raw text.
fn api_message(body: &str, status: reqwest::StatusCode) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string(),
        None => body.trim().to_string(),
    }
}

#[async_trait]
impl MergeQueue for TrunkClient {
    fn default_branch(&self) -> &str {
        &self.config.target_branch
    }

    async fn queue_status(&self, branch: &str) -> Result<QueueSnapshot, MergeQueueError> {
        let body = QueueRequest {
            repo: self.repo(),
            target_branch: branch,
        };
        let mut snapshot: QueueSnapshot = self.post_json("getQueue", &body).await?;
        if snapshot.branch.is_empty() {
            snapshot.branch = branch.to_string();
        }
        Ok(snapshot)
    }

    async fn pull_request_status(
        &self,
        pr_number: u64,
        branch: &str,
    ) -> Result<PullRequestStatus, MergeQueueError> {
        let body = PullRequestRequest {
            repo: self.repo(),
            pr: PrNumber { number: pr_number },
            target_branch: branch,
            priority: None,
        };
        let mut status: PullRequestStatus =
            self.post_json("getSubmittedPullRequest", &body).await?;
        if status.pr_number == 0 {
            status.pr_number = pr_number;
        }
        Ok(status)
    }

    async fn submit(
        &self,
        pr_number: u64,
        branch: &str,
        priority: Option<Priority>,
    ) -> Result<(), MergeQueueError> {
        let body = PullRequestRequest {
            repo: self.repo(),
            pr: PrNumber { number: pr_number },
            target_branch: branch,
            priority,
        };
        self.post("submitPullRequest", &body).await?;
        Ok(())
    }

    async fn cancel(&self, pr_number: u64, branch: &str) -> Result<(), MergeQueueError> {
        let body = PullRequestRequest {
            repo: self.repo(),
            pr: PrNumber { number: pr_number },
            target_branch: branch,
            priority: None,
        };
        self.post("cancelPullRequest", &body).await?;
        Ok(())
    }

    async fn set_state(&self, state: QueueState, branch: &str) -> Result<(), MergeQueueError> {
        let body = UpdateQueueRequest {
            repo: self.repo(),
            target_branch: branch,
            state,
        };
        self.post("updateQueue", &body).await?;
        Ok(())
    }
}
