// ABOUTME: UnconfiguredQueue - a MergeQueue that refuses every call.
// ABOUTME: Lets the tools stay registered when no credentials are available.

use async_trait::async_trait;

use super::{MergeQueue, Priority, PullRequestStatus, QueueSnapshot, QueueState};
use crate::error::MergeQueueError;

/// Stand-in queue used when configuration is missing. Every call fails with
/// `MergeQueueError::NotConfigured` carrying the original reason.
#[derive(Debug, Clone)]
pub struct UnconfiguredQueue {
    reason: String,
}

impl UnconfiguredQueue {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn refuse<T>(&self) -> Result<T, MergeQueueError> {
        Err(MergeQueueError::NotConfigured(self.reason.clone()))
    }
}

#[async_trait]
impl MergeQueue for UnconfiguredQueue {
    fn default_branch(&self) -> &str {
        super::DEFAULT_TARGET_BRANCH
    }

    async fn queue_status(&self, _branch: &str) -> Result<QueueSnapshot, MergeQueueError> {
        self.refuse()
    }

    async fn pull_request_status(
        &self,
        _pr_number: u64,
        _branch: &str,
    ) -> Result<PullRequestStatus, MergeQueueError> {
        self.refuse()
    }

    async fn submit(
        &self,
        _pr_number: u64,
        _branch: &str,
        _priority: Option<Priority>,
    ) -> Result<(), MergeQueueError> {
        self.refuse()
    }

    async fn cancel(&self, _pr_number: u64, _branch: &str) -> Result<(), MergeQueueError> {
        self.refuse()
    }

    async fn set_state(&self, _state: QueueState, _branch: &str) -> Result<(), MergeQueueError> {
        self.refuse()
    }
}
