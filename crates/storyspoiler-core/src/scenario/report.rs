// storyspoiler-core/src/scenario/report.rs
// ============================================================================
// Module: StorySpoiler Run Reports
// Description: Per-check, per-step, and per-scenario outcome records.
// Purpose: Provide serializable reports mirroring a scenario run one entry per step.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! Reports are the runner's only output. Every step produces exactly one
//! [`StepReport`] whether it passed, failed an assertion, or never issued a
//! request, so the report always carries as many entries as the spec carries
//! steps. All types serialize for artifact writers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::StoryId;

// ============================================================================
// SECTION: Check Results
// ============================================================================

/// Outcome of a single assertion evaluated against a step response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Short label identifying the assertion.
    pub label: String,
    /// Whether the assertion held.
    pub passed: bool,
    /// Detail text explaining the result.
    pub message: String,
}

impl CheckResult {
    /// Creates a passing check result.
    #[must_use]
    pub fn pass(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            passed: true,
            message: message.into(),
        }
    }

    /// Creates a failing check result.
    #[must_use]
    pub fn fail(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            passed: false,
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Step Reports
// ============================================================================

/// Terminal outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// Every assertion held.
    Passed,
    /// At least one assertion failed or the request never completed.
    Failed,
}

impl StepOutcome {
    /// Returns the stable lowercase name of the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }

    /// Returns true for [`StepOutcome::Passed`].
    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Record of one executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Zero-based position of the step in the scenario.
    pub index: usize,
    /// Step name from the spec.
    pub name: String,
    /// Terminal outcome.
    pub outcome: StepOutcome,
    /// HTTP status observed; `None` when no request was issued.
    pub http_status: Option<u16>,
    /// Assertion results in evaluation order.
    pub checks: Vec<CheckResult>,
    /// Identifier captured by this step, if any.
    pub captured_id: Option<StoryId>,
    /// Wall-clock duration of the step in milliseconds.
    pub duration_ms: u64,
}

// ============================================================================
// SECTION: Scenario Reports
// ============================================================================

/// Full record of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name from the spec.
    pub scenario: String,
    /// Step reports in execution order, one per spec step.
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    /// Returns true when every step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|step| step.outcome.is_passed())
    }

    /// Returns the number of passed steps.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.steps.iter().filter(|step| step.outcome.is_passed()).count()
    }

    /// Returns the number of failed steps.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.steps.iter().filter(|step| !step.outcome.is_passed()).count()
    }

    /// Returns the failed step reports in execution order.
    #[must_use]
    pub fn failures(&self) -> Vec<&StepReport> {
        self.steps.iter().filter(|step| !step.outcome.is_passed()).collect()
    }
}
