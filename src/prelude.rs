// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use ide_tools::prelude::*;` to get started quickly.

pub use crate::error::{MergeQueueError, SmokeError, ToolError};
pub use crate::merge_queue::{
    MergeCancelTool, MergePauseTool, MergeQueue, MergeResumeTool, MergeStatusTool,
    MergeSubmitTool, Priority, PriorityName, PullRequestStatus, QueueSnapshot, QueueState,
    TrunkClient, TrunkConfig, UnconfiguredQueue,
};
pub use crate::smoke::{CaseReport, Harness, Outcome, RegistrationCheck, SmokeCase, SmokeReport};
pub use crate::tool::{ErrorKind, Registry, Tool, ToolDefinition, ToolName, ToolResult};
