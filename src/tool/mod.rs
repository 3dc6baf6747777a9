// ABOUTME: Tool module - defines handlers, tool names, the registry, and results.
// ABOUTME: Core abstraction for name-based dispatch.

mod name;
mod registry;
mod result;
mod traits;

pub use name::*;
pub use registry::*;
pub use result::*;
pub use traits::*;
