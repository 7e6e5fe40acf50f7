// storyspoiler-core/src/runtime/observer.rs
// ============================================================================
// Module: Scenario Observer
// Description: Progress hooks for scenario execution.
// Purpose: Surface step-by-step progress without a hard logging dependency.
// Dependencies: crate::scenario
// ============================================================================

//! ## Overview
//! This module exposes a thin progress interface for scenario runs. It is
//! intentionally dependency-light so downstream surfaces can plug in console
//! rendering or structured sinks without redesign. Observers must not leak
//! credentials; reports never carry them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::scenario::report::ScenarioReport;
use crate::scenario::report::StepReport;

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Progress sink for scenario execution.
pub trait ScenarioObserver: Send + Sync {
    /// Called once before the first step executes.
    fn scenario_started(&self, scenario: &str, total_steps: usize);

    /// Called after each step completes, passed or failed.
    fn step_completed(&self, report: &StepReport);

    /// Called once after the last step with the full report.
    fn scenario_finished(&self, report: &ScenarioReport);
}

/// No-op progress sink.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopObserver;

impl ScenarioObserver for NoopObserver {
    fn scenario_started(&self, _scenario: &str, _total_steps: usize) {}

    fn step_completed(&self, _report: &StepReport) {}

    fn scenario_finished(&self, _report: &ScenarioReport) {}
}
