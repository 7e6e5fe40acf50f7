// storyspoiler-cli/src/render.rs
// ============================================================================
// Module: StorySpoiler Output Rendering
// Description: Plain-text rendering of scenario steps and run reports.
// Purpose: Keep all user-facing formatting in one testable place.
// Dependencies: storyspoiler-client, storyspoiler-core
// ============================================================================

//! ## Overview
//! Renderers return strings instead of writing to stdout so the binary owns
//! all terminal I/O and tests can assert on output without capturing streams.
//! Step lines are emitted as each step completes; the summary closes the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use storyspoiler_client::routes;
use storyspoiler_core::IdRef;
use storyspoiler_core::ScenarioReport;
use storyspoiler_core::ScenarioSpec;
use storyspoiler_core::StepAction;
use storyspoiler_core::StepReport;
use storyspoiler_core::StoryId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Placeholder shown for identifiers resolved at run time.
const CAPTURED_PLACEHOLDER: &str = "{captured}";

/// Column width for step names in run output.
const STEP_NAME_WIDTH: usize = 24;

// ============================================================================
// SECTION: Step Table
// ============================================================================

/// Renders the scenario step table: order, name, method, path, expected status.
#[must_use]
pub fn render_step_table(spec: &ScenarioSpec) -> String {
    let name_width = spec.steps.iter().map(|step| step.name.len()).max().unwrap_or(0);
    let path_width =
        spec.steps.iter().map(|step| action_path(&step.action).len()).max().unwrap_or(0);

    let mut output = String::new();
    let _ = writeln!(output, "scenario: {}", spec.name);
    for (index, step) in spec.steps.iter().enumerate() {
        let ordinal = index + 1;
        let name = step.name.as_str();
        let method = action_method(&step.action);
        let path = action_path(&step.action);
        let status = step.expect.status;
        let _ = writeln!(
            output,
            "{ordinal:>2}. {name:<name_width$}  {method:<6} {path:<path_width$}  expect {status}"
        );
    }
    output
}

// ============================================================================
// SECTION: Run Output
// ============================================================================

/// Renders the one-line (plus failed-check detail) result of a completed step.
#[must_use]
pub fn render_step_line(report: &StepReport, total_steps: usize) -> String {
    let ordinal = report.index + 1;
    let name = report.name.as_str();
    let outcome = report.outcome.as_str();
    let status = report.http_status.map_or_else(|| "---".to_string(), |code| code.to_string());
    let duration = report.duration_ms;

    let mut output = format!(
        "[{ordinal}/{total_steps}] {name:<STEP_NAME_WIDTH$} {outcome:<6} status {status} \
         ({duration} ms)"
    );
    for check in report.checks.iter().filter(|check| !check.passed) {
        let _ = write!(output, "\n      check {}: {}", check.label, check.message);
    }
    output
}

/// Renders the closing summary for a scenario run.
#[must_use]
pub fn render_summary(report: &ScenarioReport) -> String {
    let total = report.steps.len();
    let passed = report.passed_count();
    if report.passed() {
        return format!("scenario {}: passed ({passed}/{total} steps)", report.scenario);
    }
    let failed: Vec<&str> = report.failures().iter().map(|step| step.name.as_str()).collect();
    format!(
        "scenario {}: FAILED ({passed}/{total} steps passed; failed: {})",
        report.scenario,
        failed.join(", ")
    )
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the HTTP method the action uses on the wire.
const fn action_method(action: &StepAction) -> &'static str {
    match action {
        StepAction::Create {
            ..
        } => "POST",
        StepAction::Edit {
            ..
        } => "PUT",
        StepAction::List => "GET",
        StepAction::Delete {
            ..
        } => "DELETE",
    }
}

/// Returns the request path the action addresses.
fn action_path(action: &StepAction) -> String {
    match action {
        StepAction::Create {
            ..
        } => routes::STORY_CREATE.to_string(),
        StepAction::List => routes::STORY_ALL.to_string(),
        StepAction::Edit {
            target, ..
        } => routes::story_edit(&target_id(target)),
        StepAction::Delete {
            target,
        } => routes::story_delete(&target_id(target)),
    }
}

/// Resolves an identifier reference to a concrete or placeholder id.
fn target_id(target: &IdRef) -> StoryId {
    match target {
        IdRef::Captured => StoryId::new(CAPTURED_PLACEHOLDER),
        IdRef::Literal {
            id,
        } => id.clone(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
