// ABOUTME: The five merge queue tools - status, submit, cancel, pause, resume.
// ABOUTME: Each parses its argument map, calls the MergeQueue, and renders text.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{MergeQueue, Priority, PullRequestStatus, QueueSnapshot, QueueState};
use crate::error::{MergeQueueError, ToolError};
use crate::tool::{ErrorKind, Tool, ToolName, ToolResult};

/// Header line of every status report.
pub const STATUS_HEADER: &str = "Trunk Merge Status";

/// Classify a collaborator failure for the structured result.
pub fn error_kind(err: &MergeQueueError) -> ErrorKind {
    match err {
        MergeQueueError::NotConfigured(_) => ErrorKind::NotConfigured,
        MergeQueueError::Http(_) => ErrorKind::Transport,
        MergeQueueError::Api { status: 401 | 403, .. } => ErrorKind::Unauthorized,
        MergeQueueError::Api { status: 404, .. } => ErrorKind::NotFound,
        MergeQueueError::Api { .. } | MergeQueueError::Deserialize(_) => ErrorKind::Upstream,
    }
}

/// Decode an argument map. `null` is treated as an empty map.
fn parse_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T, ToolError> {
    let params = if params.is_null() {
        serde_json::json!({})
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParams(e.to_string()))
}

fn require_pr(pr_number: u64) -> Result<u64, ToolError> {
    if pr_number == 0 {
        return Err(ToolError::InvalidParams(
            "pr_number must be a positive integer".to_string(),
        ));
    }
    Ok(pr_number)
}

/// Turn a collaborator outcome into a tool result, logging failures.
fn finish<T>(
    tool: ToolName,
    invocation: Uuid,
    outcome: Result<T, MergeQueueError>,
    render: impl FnOnce(T) -> String,
) -> ToolResult {
    let result = match outcome {
        Ok(value) => {
            debug!(%invocation, tool = %tool, "merge queue call succeeded");
            ToolResult::text(render(value))
        }
        Err(err) => {
            let kind = error_kind(&err);
            warn!(%invocation, tool = %tool, kind = %kind, error = %err, "merge queue call failed");
            ToolResult::failure(kind, format!("Error: {}", err))
        }
    };
    result.with_metadata("invocation_id", invocation.to_string())
}

fn branch_of<'a>(queue: &'a dyn MergeQueue, requested: &'a Option<String>) -> &'a str {
    requested.as_deref().unwrap_or_else(|| queue.default_branch())
}

fn branch_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": "Target branch of the queue (default: configured branch)"
    })
}

fn pr_schema(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "integer",
        "minimum": 1,
        "description": description
    })
}

/// Render a whole-queue snapshot.
pub fn format_queue(snapshot: &QueueSnapshot) -> String {
    format!("{}\n{}", STATUS_HEADER, snapshot)
}

/// Render the status of one pull request.
pub fn format_pull_request(status: &PullRequestStatus) -> String {
    format!("{}\n{}", STATUS_HEADER, status)
}

// ============================================================================
// Status
// ============================================================================

/// Reports the whole queue, or one pull request when `pr_number` is given.
pub struct MergeStatusTool {
    queue: Arc<dyn MergeQueue>,
}

impl MergeStatusTool {
    pub fn new(queue: Arc<dyn MergeQueue>) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl Tool for MergeStatusTool {
    fn name(&self) -> &str {
        ToolName::MergeStatus.as_str()
    }

    fn description(&self) -> &str {
        "Show the merge queue status, or the status of one pull request when pr_number is given."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pr_number": pr_schema("Pull request to report on (default: whole queue)"),
                "target_branch": branch_schema()
            }
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            pr_number: Option<u64>,
            target_branch: Option<String>,
        }
        let params: Params = parse_params(params)?;
        let branch = branch_of(self.queue.as_ref(), &params.target_branch);
        let invocation = Uuid::new_v4();

        let result = match params.pr_number {
            Some(pr) => {
                let pr = require_pr(pr)?;
                debug!(%invocation, pr, branch, "querying pull request status");
                let outcome = self.queue.pull_request_status(pr, branch).await;
                finish(ToolName::MergeStatus, invocation, outcome, |s| {
                    format_pull_request(&s)
                })
                .with_metadata("pr_number", pr)
            }
            None => {
                debug!(%invocation, branch, "querying queue status");
                let outcome = self.queue.queue_status(branch).await;
                finish(ToolName::MergeStatus, invocation, outcome, |s| {
                    format_queue(&s)
                })
            }
        };
        Ok(result.with_metadata("target_branch", branch))
    }
}

// ============================================================================
// Submit
// ============================================================================

/// Submits a pull request to the queue.
pub struct MergeSubmitTool {
    queue: Arc<dyn MergeQueue>,
}

impl MergeSubmitTool {
    pub fn new(queue: Arc<dyn MergeQueue>) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl Tool for MergeSubmitTool {
    fn name(&self) -> &str {
        ToolName::MergeSubmit.as_str()
    }

    fn description(&self) -> &str {
        "Submit a pull request to the merge queue."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pr_number": pr_schema("Pull request to submit"),
                "priority": {
                    "description": "0-255 or one of low, medium, high, urgent",
                    "oneOf": [
                        { "type": "integer", "minimum": 0, "maximum": 255 },
                        { "type": "string", "enum": ["low", "medium", "high", "urgent"] }
                    ]
                },
                "target_branch": branch_schema()
            },
            "required": ["pr_number"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            pr_number: u64,
            priority: Option<Priority>,
            target_branch: Option<String>,
        }
        let params: Params = parse_params(params)?;
        let pr = require_pr(params.pr_number)?;
        let branch = branch_of(self.queue.as_ref(), &params.target_branch);
        let invocation = Uuid::new_v4();

        debug!(%invocation, pr, branch, "submitting pull request");
        let outcome = self.queue.submit(pr, branch, params.priority).await;
        let result = finish(ToolName::MergeSubmit, invocation, outcome, |()| {
            match params.priority {
                Some(p) => format!(
                    "Submitted PR #{} to the merge queue on {} with priority {}",
                    pr, branch, p
                ),
                None => format!("Submitted PR #{} to the merge queue on {}", pr, branch),
            }
        });
        Ok(result
            .with_metadata("pr_number", pr)
            .with_metadata("target_branch", branch))
    }
}

// ============================================================================
// Cancel
// ============================================================================

/// Removes a pull request from the queue.
pub struct MergeCancelTool {
    queue: Arc<dyn MergeQueue>,
}

impl MergeCancelTool {
    pub fn new(queue: Arc<dyn MergeQueue>) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl Tool for MergeCancelTool {
    fn name(&self) -> &str {
        ToolName::MergeCancel.as_str()
    }

    fn description(&self) -> &str {
        "Cancel a pull request that is waiting in the merge queue."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pr_number": pr_schema("Pull request to cancel"),
                "target_branch": branch_schema()
            },
            "required": ["pr_number"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            pr_number: u64,
            target_branch: Option<String>,
        }
        let params: Params = parse_params(params)?;
        let pr = require_pr(params.pr_number)?;
        let branch = branch_of(self.queue.as_ref(), &params.target_branch);
        let invocation = Uuid::new_v4();

        debug!(%invocation, pr, branch, "cancelling pull request");
        let outcome = self.queue.cancel(pr, branch).await;
        let result = finish(ToolName::MergeCancel, invocation, outcome, |()| {
            format!("Cancelled PR #{} from the merge queue on {}", pr, branch)
        });
        Ok(result
            .with_metadata("pr_number", pr)
            .with_metadata("target_branch", branch))
    }
}

// ============================================================================
// Pause / Resume
// ============================================================================

/// Shared body of the pause and resume tools.
async fn change_state(
    queue: &dyn MergeQueue,
    tool: ToolName,
    state: QueueState,
    params: serde_json::Value,
) -> Result<ToolResult, anyhow::Error> {
    #[derive(Deserialize)]
    struct Params {
        target_branch: Option<String>,
    }
    let params: Params = parse_params(params)?;
    let branch = branch_of(queue, &params.target_branch);
    let invocation = Uuid::new_v4();

    debug!(%invocation, %state, branch, "changing queue state");
    let outcome = queue.set_state(state, branch).await;
    let verb = if state == QueueState::Paused {
        "Paused"
    } else {
        "Resumed"
    };
    let result = finish(tool, invocation, outcome, |()| {
        format!("{} the merge queue on {}", verb, branch)
    });
    Ok(result.with_metadata("target_branch", branch))
}

/// Pauses the queue; queued pull requests stay queued.
pub struct MergePauseTool {
    queue: Arc<dyn MergeQueue>,
}

impl MergePauseTool {
    pub fn new(queue: Arc<dyn MergeQueue>) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl Tool for MergePauseTool {
    fn name(&self) -> &str {
        ToolName::MergePause.as_str()
    }

    fn description(&self) -> &str {
        "Pause the merge queue."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": { "target_branch": branch_schema() }
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        change_state(
            self.queue.as_ref(),
            ToolName::MergePause,
            QueueState::Paused,
            params,
        )
        .await
    }
}

/// Resumes a paused queue.
pub struct MergeResumeTool {
    queue: Arc<dyn MergeQueue>,
}

impl MergeResumeTool {
    pub fn new(queue: Arc<dyn MergeQueue>) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl Tool for MergeResumeTool {
    fn name(&self) -> &str {
        ToolName::MergeResume.as_str()
    }

    fn description(&self) -> &str {
        "Resume a paused merge queue."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": { "target_branch": branch_schema() }
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        change_state(
            self.queue.as_ref(),
            ToolName::MergeResume,
            QueueState::Running,
            params,
        )
        .await
    }
}
