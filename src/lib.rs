// ABOUTME: Root module for ide-tools - named tool handlers for IDE tool dispatch.
// ABOUTME: Re-exports the registry, the merge queue tools, and the smoke harness.

pub mod error;
pub mod merge_queue;
pub mod prelude;
pub mod smoke;
pub mod tool;
