// ABOUTME: Tests for the smoke harness - fail-fast registration, outcome tagging, rendering.
// ABOUTME: Uses small scripted tools registered under the merge queue names.

use std::sync::Arc;

use async_trait::async_trait;

use super::*;
use crate::merge_queue::UnconfiguredQueue;
use crate::tool::{ErrorKind, Registry, Tool, ToolName, ToolResult};

enum Behavior {
    Succeed(String),
    ReturnError(ErrorKind),
    Raise,
    Panic,
}

struct ScriptedTool {
    name: ToolName,
    behavior: Behavior,
}

#[async_trait]
impl Tool for ScriptedTool {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn description(&self) -> &str {
        "scripted"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object" })
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        match &self.behavior {
            Behavior::Succeed(text) => Ok(ToolResult::text(text.clone())),
            Behavior::ReturnError(kind) => Ok(ToolResult::failure(*kind, "Error: PR not found")),
            Behavior::Raise => Err(anyhow::anyhow!("connection reset")),
            Behavior::Panic => panic!("handler blew up"),
        }
    }
}

fn scripted_registry(behaviors: Vec<(ToolName, Behavior)>) -> Registry {
    let mut registry = Registry::new();
    for (name, behavior) in behaviors {
        registry.register(ScriptedTool { name, behavior });
    }
    registry
}

fn all_succeeding() -> Registry {
    scripted_registry(
        ToolName::ALL
            .into_iter()
            .map(|n| (n, Behavior::Succeed(format!("{} ok", n))))
            .collect(),
    )
}

#[test]
fn test_preview_truncates_on_char_boundary() {
    let short = "Trunk Merge Status";
    assert_eq!(preview(short), short);

    let long = "é".repeat(PREVIEW_CHARS + 10);
    let p = preview(&long);
    assert!(p.ends_with("..."));
    assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);

    let exact = "x".repeat(PREVIEW_CHARS);
    assert_eq!(preview(&exact), exact);
}

#[test]
fn test_registration_passes_for_merge_queue_registry() {
    let registry = Registry::with_merge_queue(Arc::new(UnconfiguredQueue::new("test")));
    let check = Harness::new(&registry).check_registration();

    assert!(check.passed());
    assert_eq!(check.found, ToolName::ALL.to_vec());
    assert!(check.into_result().is_ok());
}

#[test]
fn test_registration_stops_at_first_missing() {
    let registry = scripted_registry(vec![
        (ToolName::MergeStatus, Behavior::Succeed(String::new())),
        (ToolName::MergeSubmit, Behavior::Succeed(String::new())),
        (ToolName::MergePause, Behavior::Succeed(String::new())),
        (ToolName::MergeResume, Behavior::Succeed(String::new())),
    ]);
    let check = Harness::new(&registry).check_registration();

    assert!(!check.passed());
    assert_eq!(check.found, vec![ToolName::MergeStatus, ToolName::MergeSubmit]);
    assert_eq!(check.missing, Some(ToolName::MergeCancel));

    let err = check.into_result().unwrap_err();
    assert_eq!(err.to_string(), "Handler missing: trunk_merge_cancel");
}

#[tokio::test]
async fn test_missing_handler_aborts_with_exit_code_one() {
    let registry = scripted_registry(vec![(ToolName::MergeStatus, Behavior::Raise)]);
    let report = Harness::new(&registry).run().await;

    assert!(!report.passed());
    assert_eq!(report.exit_code(), 1);
    assert!(report.cases.is_empty());

    let text = render_to_string(&report);
    assert!(text.contains("✓ Handler found: trunk_merge_status"));
    assert!(text.contains("✗ Handler missing: trunk_merge_submit"));
    assert!(text.contains("=== Test Aborted ==="));
    assert!(!text.contains("[Test 2]"));
}

#[tokio::test]
async fn test_all_cases_execute() {
    let registry = all_succeeding();
    let report = Harness::new(&registry).run().await;

    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.cases.len(), 4);
    assert!(report.cases.iter().all(|c| c.outcome == Outcome::Executed));
    assert_eq!(
        report.cases[0].preview.as_deref(),
        Some("trunk_merge_status ok")
    );
}

#[tokio::test]
async fn test_behavioral_failures_do_not_change_verdict() {
    let registry = scripted_registry(vec![
        (
            ToolName::MergeStatus,
            Behavior::ReturnError(ErrorKind::NotConfigured),
        ),
        (ToolName::MergeSubmit, Behavior::Raise),
        (ToolName::MergeCancel, Behavior::Panic),
        (ToolName::MergePause, Behavior::Succeed(String::new())),
        (ToolName::MergeResume, Behavior::Succeed(String::new())),
    ]);
    let report = Harness::new(&registry).run().await;

    assert!(report.passed());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.cases.len(), 4);

    assert_eq!(
        report.cases[0].outcome,
        Outcome::Unverified {
            kind: Some(ErrorKind::NotConfigured),
            reason: "Error: PR not found".to_string(),
        }
    );
    assert_eq!(
        report.cases[2].outcome,
        Outcome::Raised {
            reason: "connection reset".to_string()
        }
    );
    assert!(!report.cases[2].outcome.is_defect());
    assert!(report.cases[3].outcome.is_defect());

    let text = render_to_string(&report);
    assert!(text.contains("⚠ Error (expected if PR doesn't exist): connection reset"));
    assert!(text.contains("✗ Failed: handler trunk_merge_cancel panicked"));
    assert!(text.contains("=== Test Complete ==="));
}

#[tokio::test]
async fn test_run_case_without_handler_is_failed() {
    let registry = Registry::new();
    let harness = Harness::new(&registry);
    let case = SmokeCase::new(ToolName::MergeResume, "resume", serde_json::json!({}));

    let report = harness.run_case(&case).await;
    assert!(report.outcome.is_defect());
    assert!(report.preview.is_none());
}

#[tokio::test]
async fn test_unconfigured_registry_runs_every_case() {
    let registry = Registry::with_merge_queue(Arc::new(UnconfiguredQueue::new(
        "TRUNK_API_TOKEN environment variable not set",
    )));
    let report = Harness::new(&registry).run().await;

    assert_eq!(report.exit_code(), 0);
    for case in &report.cases {
        match &case.outcome {
            Outcome::Unverified { kind, .. } => {
                assert_eq!(*kind, Some(ErrorKind::NotConfigured))
            }
            other => panic!("unexpected outcome for {}: {:?}", case.label, other),
        }
    }
}

#[tokio::test]
async fn test_custom_cases_and_required() {
    let registry = scripted_registry(vec![(
        ToolName::MergePause,
        Behavior::Succeed("Paused".to_string()),
    )]);
    let report = Harness::new(&registry)
        .required(vec![ToolName::MergePause])
        .cases(vec![SmokeCase::new(
            ToolName::MergePause,
            "pause",
            serde_json::json!({}),
        )])
        .run()
        .await;

    assert!(report.passed());
    let text = render_to_string(&report);
    assert!(text.contains("[Test 2] Testing pause..."));
    assert!(text.contains("✓ trunk_merge_pause executed"));
    assert!(text.contains("Output preview: Paused"));
}

#[tokio::test]
async fn test_registration_only_run() {
    let registry = all_succeeding();
    let report = Harness::new(&registry).cases(Vec::new()).run().await;

    assert!(report.cases.is_empty());
    assert!(report.passed());
    assert_eq!(report.exit_code(), 0);

    let text = render_to_string(&report);
    assert!(text.contains("✓ Handler found: trunk_merge_resume"));
    assert!(!text.contains("[Test 2]"));
    assert!(text.contains("Test Complete"));
}

/// Writer that refuses every write, like a closed pipe.
struct BrokenPipe;

impl std::io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_write_failure_leaves_exit_code_alone() {
    let registry = all_succeeding();
    let report = Harness::new(&registry).run().await;

    assert!(render(&report, &mut BrokenPipe).is_err());
    assert_eq!(report.exit_code(), 0);
}
