// ABOUTME: Renders a SmokeReport as the human-readable console transcript.
// ABOUTME: Lines are marked with a check, a cross, or a warning sign.

use std::io::{self, Write};

use super::{CaseReport, Outcome, SmokeReport};

pub const OK: &str = "✓";
pub const FAIL: &str = "✗";
pub const WARN: &str = "⚠";

/// Write the transcript for `report`.
pub fn render<W: Write>(report: &SmokeReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Testing Trunk Merge Queue Handlers ===")?;
    writeln!(out)?;

    writeln!(out, "[Test 1] Checking handler registration...")?;
    for name in &report.registration.found {
        writeln!(out, "  {} Handler found: {}", OK, name)?;
    }
    if let Some(name) = report.registration.missing {
        writeln!(out, "  {} Handler missing: {}", FAIL, name)?;
        writeln!(out)?;
        writeln!(out, "=== Test Aborted ===")?;
        return Ok(());
    }

    for (i, case) in report.cases.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "[Test {}] Testing {}...", i + 2, case.label)?;
        render_case(case, out)?;
    }

    writeln!(out)?;
    writeln!(out, "=== Test Complete ===")
}

fn render_case<W: Write>(case: &CaseReport, out: &mut W) -> io::Result<()> {
    match &case.outcome {
        Outcome::Executed => {
            writeln!(out, "  {} {} executed", OK, case.tool)?;
            if let Some(preview) = &case.preview {
                writeln!(out, "  Output preview: {}", preview)?;
            }
            Ok(())
        }
        Outcome::Unverified { kind, reason } => {
            let kind = kind.map(|k| k.as_str()).unwrap_or("unknown");
            writeln!(
                out,
                "  {} {} returned an error result ({}, {})",
                WARN, case.tool, kind, case.precondition
            )?;
            writeln!(out, "  Result: {}", super::preview(reason))
        }
        Outcome::Raised { reason } => writeln!(
            out,
            "  {} Error ({}): {}",
            WARN, case.precondition, reason
        ),
        Outcome::Failed { reason } => writeln!(out, "  {} Failed: {}", FAIL, reason),
    }
}

/// Render to a `String`.
pub fn render_to_string(report: &SmokeReport) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render(report, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
