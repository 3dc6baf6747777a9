// ABOUTME: Implements the Registry - a name to handler map populated at startup
// ABOUTME: and read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Tool, ToolDefinition, ToolName};
use crate::merge_queue::{self, MergeQueue};

/// A registry of tool handlers keyed by name.
///
/// Handlers are held behind `Arc`, so every lookup of the same name hands out
/// the same handler instance for the lifetime of the registry.
#[derive(Default, Clone)]
pub struct Registry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every merge queue tool, all bound to `queue`.
    pub fn with_merge_queue(queue: Arc<dyn MergeQueue>) -> Self {
        let mut registry = Self::new();
        merge_queue::register_tools(&mut registry, queue);
        registry
    }

    /// Register a tool. A later registration under the same name replaces the earlier one.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    /// Register a tool from an Arc.
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a handler by name. Unknown names yield `None`.
    pub fn get_handler(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.get_handler(name)
    }

    /// Look up one of the known merge queue tools.
    pub fn handler(&self, name: ToolName) -> Option<Arc<dyn Tool>> {
        self.get_handler(name.as_str())
    }

    /// Check whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names, sorted alphabetically.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all registered tools.
    pub fn all(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.values().cloned().collect()
    }

    /// Get the number of registered tools.
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Convert all tools to definitions, sorted by name.
    pub fn to_definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<_> = self
            .all()
            .iter()
            .map(|t| ToolDefinition::from(&**t))
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }
}
