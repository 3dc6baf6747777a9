// ABOUTME: Defines all error types for the tool executor using thiserror.
// ABOUTME: Each submodule has its own error enum.

/// Errors from tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

/// Errors from the merge queue collaborator.
#[derive(Debug, thiserror::Error)]
pub enum MergeQueueError {
    #[error("Merge queue not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Errors raised by the smoke harness.
#[derive(Debug, thiserror::Error)]
pub enum SmokeError {
    #[error("Handler missing: {0}")]
    MissingHandler(String),
}
