// ABOUTME: Defines the ToolResult type - a tagged structure for tool
// ABOUTME: execution outcomes with content, error kind, and metadata.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a failed tool result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Arguments were well-formed JSON but semantically unusable.
    InvalidParams,
    /// The backing service has no configuration.
    NotConfigured,
    /// The backing service rejected our credentials.
    Unauthorized,
    /// The referenced entity does not exist upstream.
    NotFound,
    /// The backing service answered with a failure.
    Upstream,
    /// The request never got a usable answer.
    Transport,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidParams => "invalid_params",
            ErrorKind::NotConfigured => "not_configured",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Upstream => "upstream",
            ErrorKind::Transport => "transport",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a tool execution.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// The output content.
    pub content: String,

    /// Whether this result represents an error.
    pub is_error: bool,

    /// What kind of failure this is, when known.
    pub error_kind: Option<ErrorKind>,

    /// Optional metadata about the execution.
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ToolResult {
    /// Create a successful text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
            error_kind: None,
            metadata: HashMap::new(),
        }
    }

    /// Create an error result without a kind.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: true,
            error_kind: None,
            metadata: HashMap::new(),
        }
    }

    /// Create an error result tagged with a kind.
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error_kind: Some(kind),
            ..Self::error(message)
        }
    }

    /// Add metadata to the result.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), v);
        }
        self
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::text("")
    }
}
