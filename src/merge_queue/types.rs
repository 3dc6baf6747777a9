// ABOUTME: Wire types exchanged with the merge queue service.
// ABOUTME: Queue snapshots, pull request status, queue state, and submit priority.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Operating state of a merge queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueState {
    Running,
    Paused,
    Draining,
    #[serde(other)]
    Unknown,
}

impl QueueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueState::Running => "RUNNING",
            QueueState::Paused => "PAUSED",
            QueueState::Draining => "DRAINING",
            QueueState::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for QueueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named submit priorities accepted by the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityName {
    Low,
    Medium,
    High,
    Urgent,
}

/// Submit priority: either a named level or a raw value in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Level(u8),
    Named(PriorityName),
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Level(n) => write!(f, "{}", n),
            Priority::Named(name) => {
                let s = match name {
                    PriorityName::Low => "low",
                    PriorityName::Medium => "medium",
                    PriorityName::High => "high",
                    PriorityName::Urgent => "urgent",
                };
                f.write_str(s)
            }
        }
    }
}

/// Pull request summary as embedded in queue listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullRequestRef {
    #[serde(deserialize_with = "null_as_default")]
    pub number: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
}

/// One entry of a queue listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueuedPullRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    pub priority_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub pr: PullRequestRef,
}

/// Snapshot of a whole queue for one target branch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueSnapshot {
    pub state: Option<QueueState>,
    #[serde(deserialize_with = "null_as_default")]
    pub branch: String,
    pub concurrency: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub enqueued_pull_requests: Vec<QueuedPullRequest>,
}

/// Status of a single submitted pull request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullRequestStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    pub state_changed_at: Option<String>,
    pub priority_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_currently_submitted_to_queue: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub pr_number: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub pr_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pr_author: String,
}

impl fmt::Display for QueueSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Branch: {}", self.branch)?;
        if let Some(state) = self.state {
            write!(f, "\nState: {}", state)?;
        }
        if let Some(concurrency) = self.concurrency {
            write!(f, "\nConcurrency: {}", concurrency)?;
        }

        if self.enqueued_pull_requests.is_empty() {
            return f.write_str("\nQueue is empty");
        }

        write!(f, "\nQueued PRs: {}", self.enqueued_pull_requests.len())?;
        for entry in &self.enqueued_pull_requests {
            write!(f, "\n  #{} {}", entry.pr.number, entry.pr.title)?;
            if !entry.pr.author.is_empty() {
                write!(f, " ({})", entry.pr.author)?;
            }
            write!(f, " - {}", entry.state)?;
            if let Some(priority) = &entry.priority_name {
                write!(f, " [{}]", priority)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PR #{}", self.pr_number)?;
        if !self.pr_title.is_empty() {
            write!(f, ": {}", self.pr_title)?;
        }
        if !self.pr_author.is_empty() {
            write!(f, " ({})", self.pr_author)?;
        }
        write!(f, "\nState: {}", self.state)?;
        if let Some(at) = &self.state_changed_at {
            write!(f, " (since {})", at)?;
        }
        let in_queue = if self.is_currently_submitted_to_queue {
            "yes"
        } else {
            "no"
        };
        write!(f, "\nIn queue: {}", in_queue)?;
        if let Some(priority) = &self.priority_name {
            write!(f, "\nPriority: {}", priority)?;
        }
        Ok(())
    }
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
