// ABOUTME: Harness - runs the registration check and the smoke cases in order.
// ABOUTME: Handler failures are caught per case; only registration decides the verdict.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::error::SmokeError;
use crate::tool::{ErrorKind, Registry, ToolName};

/// Number of characters kept in a result preview.
pub const PREVIEW_CHARS: usize = 200;

/// One representative handler call.
#[derive(Debug, Clone)]
pub struct SmokeCase {
    pub label: String,
    pub tool: ToolName,
    pub params: serde_json::Value,
    /// Why a failure of this call is expected when live state does not cooperate.
    pub precondition: String,
}

impl SmokeCase {
    pub fn new(tool: ToolName, label: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            label: label.into(),
            tool,
            params,
            precondition: "expected if the queue state does not allow it".to_string(),
        }
    }

    pub fn precondition(mut self, note: impl Into<String>) -> Self {
        self.precondition = note.into();
        self
    }

    /// The default cases: status for the whole queue and for PR #9, then a
    /// submit and a cancel of a PR number that should not exist.
    pub fn standard() -> Vec<SmokeCase> {
        vec![
            SmokeCase::new(
                ToolName::MergeStatus,
                "trunk_merge_status (overall queue)",
                serde_json::json!({}),
            ),
            SmokeCase::new(
                ToolName::MergeStatus,
                "trunk_merge_status (PR #9)",
                serde_json::json!({ "pr_number": 9 }),
            )
            .precondition("expected if PR #9 was never submitted"),
            SmokeCase::new(
                ToolName::MergeSubmit,
                "trunk_merge_submit (will fail if not a real PR)",
                serde_json::json!({ "pr_number": 99999 }),
            )
            .precondition("expected if PR doesn't exist"),
            SmokeCase::new(
                ToolName::MergeCancel,
                "trunk_merge_cancel (will fail if not in queue)",
                serde_json::json!({ "pr_number": 99999 }),
            )
            .precondition("expected if PR not in queue"),
        ]
    }
}

/// What happened when a smoke case ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The handler returned a success result.
    Executed,
    /// The handler returned an error result; correctness depends on external state.
    Unverified {
        kind: Option<ErrorKind>,
        reason: String,
    },
    /// The handler returned `Err`; treated as an unmet precondition, not a defect.
    Raised { reason: String },
    /// The harness could not run the case at all.
    Failed { reason: String },
}

impl Outcome {
    pub fn is_defect(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Record of one smoke case.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub label: String,
    pub tool: ToolName,
    pub precondition: String,
    pub outcome: Outcome,
    /// Leading part of the returned text, when the handler returned one.
    pub preview: Option<String>,
}

/// Result of looking up the required tool names.
#[derive(Debug, Clone, Default)]
pub struct RegistrationCheck {
    /// Names found, in check order, up to the first missing one.
    pub found: Vec<ToolName>,
    /// The first name with no handler, if any. Checking stops there.
    pub missing: Option<ToolName>,
}

impl RegistrationCheck {
    pub fn passed(&self) -> bool {
        self.missing.is_none()
    }

    pub fn into_result(self) -> Result<Vec<ToolName>, SmokeError> {
        match self.missing {
            Some(name) => Err(SmokeError::MissingHandler(name.to_string())),
            None => Ok(self.found),
        }
    }
}

/// Full outcome of a harness run.
#[derive(Debug, Clone, Default)]
pub struct SmokeReport {
    pub registration: RegistrationCheck,
    pub cases: Vec<CaseReport>,
}

impl SmokeReport {
    /// Only the registration check decides the verdict.
    pub fn passed(&self) -> bool {
        self.registration.passed()
    }

    /// Process exit status: 0 when every handler is registered, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.passed() { 0 } else { 1 }
    }
}

/// Truncate `text` to [`PREVIEW_CHARS`] characters on a char boundary.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Sequential smoke harness over a registry.
pub struct Harness<'a> {
    registry: &'a Registry,
    required: Vec<ToolName>,
    cases: Vec<SmokeCase>,
}

impl<'a> Harness<'a> {
    /// A harness requiring every known tool and running the standard cases.
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            required: ToolName::ALL.to_vec(),
            cases: SmokeCase::standard(),
        }
    }

    /// Replace the smoke cases.
    pub fn cases(mut self, cases: Vec<SmokeCase>) -> Self {
        self.cases = cases;
        self
    }

    /// Replace the list of required tool names.
    pub fn required(mut self, names: Vec<ToolName>) -> Self {
        self.required = names;
        self
    }

    /// Look up each required name in order, stopping at the first missing one.
    pub fn check_registration(&self) -> RegistrationCheck {
        let mut check = RegistrationCheck::default();
        for &name in &self.required {
            if self.registry.handler(name).is_some() {
                debug!(tool = %name, "handler found");
                check.found.push(name);
            } else {
                warn!(tool = %name, "handler missing");
                check.missing = Some(name);
                break;
            }
        }
        check
    }

    /// Invoke one case inside a failure boundary.
    pub async fn run_case(&self, case: &SmokeCase) -> CaseReport {
        let mut report = CaseReport {
            label: case.label.clone(),
            tool: case.tool,
            precondition: case.precondition.clone(),
            outcome: Outcome::Executed,
            preview: None,
        };

        let Some(handler) = self.registry.handler(case.tool) else {
            report.outcome = Outcome::Failed {
                reason: format!("no handler registered for {}", case.tool),
            };
            return report;
        };

        let call = AssertUnwindSafe(handler.execute(case.params.clone())).catch_unwind();
        let outcome = match call.await {
            Ok(Ok(result)) => {
                report.preview = Some(preview(&result.content));
                if result.is_error {
                    Outcome::Unverified {
                        kind: result.error_kind,
                        reason: result.content,
                    }
                } else {
                    Outcome::Executed
                }
            }
            Ok(Err(err)) => Outcome::Raised {
                reason: err.to_string(),
            },
            Err(_) => Outcome::Failed {
                reason: format!("handler {} panicked", case.tool),
            },
        };
        report.outcome = outcome;

        info!(case = %case.label, outcome = ?report.outcome, "smoke case finished");
        report
    }

    /// Run the registration check, then the cases if it passed.
    pub async fn run(&self) -> SmokeReport {
        let registration = self.check_registration();
        if !registration.passed() {
            return SmokeReport {
                registration,
                cases: Vec::new(),
            };
        }

        let mut cases = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            cases.push(self.run_case(case).await);
        }
        SmokeReport {
            registration,
            cases,
        }
    }
}
