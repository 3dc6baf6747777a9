// ABOUTME: Defines the Tool trait - the handler abstraction the registry dispatches to.
// ABOUTME: Tools have a name, description, schema, and async execute method.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ToolResult;

/// A named handler that can be invoked with an argument map.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for command protocol clients.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given parameters.
    ///
    /// An `Err` means the handler itself failed (malformed arguments, internal
    /// fault). Failures of the backing service come back as an error `ToolResult`.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error>;
}

/// Definition of a tool as advertised to an external command protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl<T: Tool + ?Sized> From<&T> for ToolDefinition {
    fn from(tool: &T) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.schema(),
        }
    }
}
