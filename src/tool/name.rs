// ABOUTME: ToolName - the closed set of merge queue tool names the executor knows.
// ABOUTME: Maps between the enum and the stable wire strings used for dispatch.

use std::fmt;
use std::str::FromStr;

use crate::error::ToolError;

/// Known merge queue tools, in the order they are checked at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    MergeStatus,
    MergeSubmit,
    MergeCancel,
    MergePause,
    MergeResume,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::MergeStatus,
        ToolName::MergeSubmit,
        ToolName::MergeCancel,
        ToolName::MergePause,
        ToolName::MergeResume,
    ];

    /// The wire name used for registry lookups.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::MergeStatus => "trunk_merge_status",
            ToolName::MergeSubmit => "trunk_merge_submit",
            ToolName::MergeCancel => "trunk_merge_cancel",
            ToolName::MergePause => "trunk_merge_pause",
            ToolName::MergeResume => "trunk_merge_resume",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ToolError::NotFound(s.to_string()))
    }
}
