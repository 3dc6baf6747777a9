// ABOUTME: Merge queue module - tools backed by an external merge queue service.
// ABOUTME: Defines the MergeQueue collaborator trait and registers the five queue tools.

mod client;
mod config;
mod tools;
mod types;
mod unconfigured;

use std::sync::Arc;

use async_trait::async_trait;

pub use client::TrunkClient;
pub use config::*;
pub use tools::*;
pub use types::*;
pub use unconfigured::UnconfiguredQueue;

use crate::error::MergeQueueError;
use crate::tool::Registry;

/// The external merge queue the tools delegate to.
#[async_trait]
pub trait MergeQueue: Send + Sync {
    /// Branch used when a call does not name one.
    fn default_branch(&self) -> &str;

    /// Snapshot of the whole queue for `branch`.
    async fn queue_status(&self, branch: &str) -> Result<QueueSnapshot, MergeQueueError>;

    /// Status of one submitted pull request.
    async fn pull_request_status(
        &self,
        pr_number: u64,
        branch: &str,
    ) -> Result<PullRequestStatus, MergeQueueError>;

    /// Submit a pull request to the queue.
    async fn submit(
        &self,
        pr_number: u64,
        branch: &str,
        priority: Option<Priority>,
    ) -> Result<(), MergeQueueError>;

    /// Remove a pull request from the queue.
    async fn cancel(&self, pr_number: u64, branch: &str) -> Result<(), MergeQueueError>;

    /// Pause or resume the queue.
    async fn set_state(&self, state: QueueState, branch: &str) -> Result<(), MergeQueueError>;
}

/// Register every merge queue tool, all sharing one collaborator.
pub fn register_tools(registry: &mut Registry, queue: Arc<dyn MergeQueue>) {
    registry.register(MergeStatusTool::new(queue.clone()));
    registry.register(MergeSubmitTool::new(queue.clone()));
    registry.register(MergeCancelTool::new(queue.clone()));
    registry.register(MergePauseTool::new(queue.clone()));
    registry.register(MergeResumeTool::new(queue));
}

#[cfg(test)]
mod client_test;
