// storyspoiler-core/src/runtime/runner.rs
// ============================================================================
// Module: Scenario Runner
// Description: Ordered step execution with explicit cross-step state.
// Purpose: Drive a validated scenario spec against a story API, one step at a time.
// Dependencies: crate::{core, scenario, runtime}
// ============================================================================

//! ## Overview
//! The runner walks the step list front to back on a single task. Every step
//! executes regardless of earlier outcomes; a failure is recorded in that
//! step's report and the walk continues. State shared between steps lives in
//! an explicit [`ScenarioContext`] threaded through the loop, never in
//! globals, so two runs of the same spec cannot observe each other.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use crate::core::identifiers::StoryId;
use crate::core::story::ApiResult;
use crate::core::story::StoryRecord;
use crate::runtime::api::ApiError;
use crate::runtime::api::StoryApi;
use crate::runtime::checks::evaluate_expectation;
use crate::runtime::observer::NoopObserver;
use crate::runtime::observer::ScenarioObserver;
use crate::scenario::report::CheckResult;
use crate::scenario::report::ScenarioReport;
use crate::scenario::report::StepOutcome;
use crate::scenario::report::StepReport;
use crate::scenario::spec::IdRef;
use crate::scenario::spec::ScenarioSpec;
use crate::scenario::spec::SpecError;
use crate::scenario::spec::StepAction;
use crate::scenario::spec::StepSpec;

// ============================================================================
// SECTION: Scenario Context
// ============================================================================

/// State threaded from step to step during a run.
///
/// # Invariants
/// - Holds at most one captured identifier; a later capture replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioContext {
    /// Identifier captured by the most recent capturing step.
    captured_id: Option<StoryId>,
}

impl ScenarioContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            captured_id: None,
        }
    }

    /// Returns the currently captured identifier, if any.
    #[must_use]
    pub const fn captured_id(&self) -> Option<&StoryId> {
        self.captured_id.as_ref()
    }

    /// Stores a captured identifier, replacing any earlier capture.
    pub fn capture(&mut self, id: StoryId) {
        self.captured_id = Some(id);
    }
}

// ============================================================================
// SECTION: Scenario Runner
// ============================================================================

/// Outcome of dispatching one step action.
enum Dispatch {
    /// A request was issued and produced a transport-level outcome.
    Sent(Result<ApiResult, ApiError>),
    /// The step needed a captured identifier and none was available.
    MissingCapture,
}

/// Drives a validated scenario spec against a story API.
pub struct ScenarioRunner<A, O> {
    /// Scenario specification interpreted by the run loop.
    spec: ScenarioSpec,
    /// Story API backend.
    api: A,
    /// Progress sink.
    observer: O,
}

impl<A: StoryApi> ScenarioRunner<A, NoopObserver> {
    /// Creates a runner with no progress observer.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the scenario spec fails validation.
    pub fn new(spec: ScenarioSpec, api: A) -> Result<Self, SpecError> {
        Self::with_observer(spec, api, NoopObserver)
    }
}

impl<A, O> ScenarioRunner<A, O>
where
    A: StoryApi,
    O: ScenarioObserver,
{
    /// Creates a runner with a progress observer.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the scenario spec fails validation.
    pub fn with_observer(spec: ScenarioSpec, api: A, observer: O) -> Result<Self, SpecError> {
        spec.validate()?;
        Ok(Self {
            spec,
            api,
            observer,
        })
    }

    /// Returns the scenario specification the runner interprets.
    #[must_use]
    pub const fn spec(&self) -> &ScenarioSpec {
        &self.spec
    }

    /// Returns the story API backend the runner drives.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Executes every step strictly in order and returns the run report.
    pub async fn run(&self) -> ScenarioReport {
        self.observer.scenario_started(&self.spec.name, self.spec.steps.len());

        let mut context = ScenarioContext::new();
        let mut steps = Vec::with_capacity(self.spec.steps.len());
        for (index, step) in self.spec.steps.iter().enumerate() {
            let report = self.run_step(index, step, &mut context).await;
            self.observer.step_completed(&report);
            steps.push(report);
        }

        let report = ScenarioReport {
            scenario: self.spec.name.clone(),
            steps,
        };
        self.observer.scenario_finished(&report);
        report
    }

    /// Executes one step and records its outcome.
    async fn run_step(
        &self,
        index: usize,
        step: &StepSpec,
        context: &mut ScenarioContext,
    ) -> StepReport {
        let started = Instant::now();
        let dispatch = self.dispatch(&step.action, context).await;

        let (http_status, checks, captured_id) = match dispatch {
            Dispatch::MissingCapture => {
                (None, vec![CheckResult::fail("capture", "no captured story identifier")], None)
            }
            Dispatch::Sent(Err(err)) => {
                (None, vec![CheckResult::fail("transport", err.to_string())], None)
            }
            Dispatch::Sent(Ok(result)) => {
                let checks = evaluate_expectation(&step.expect, &result);
                let captured_id = if step.capture_id {
                    capture_from(&result)
                } else {
                    None
                };
                if let Some(id) = &captured_id {
                    context.capture(id.clone());
                }
                (Some(result.status), checks, captured_id)
            }
        };

        let outcome = if checks.iter().all(|check| check.passed) {
            StepOutcome::Passed
        } else {
            StepOutcome::Failed
        };

        StepReport {
            index,
            name: step.name.clone(),
            outcome,
            http_status,
            checks,
            captured_id,
            duration_ms: elapsed_ms(started),
        }
    }

    /// Issues the request for a step action, resolving its target first.
    async fn dispatch(&self, action: &StepAction, context: &ScenarioContext) -> Dispatch {
        match action {
            StepAction::Create {
                draft,
            } => Dispatch::Sent(self.api.create_story(draft).await),
            StepAction::Edit {
                target,
                draft,
            } => match resolve_target(target, context) {
                Some(id) => Dispatch::Sent(self.api.edit_story(&id, draft).await),
                None => Dispatch::MissingCapture,
            },
            StepAction::List => Dispatch::Sent(self.api.list_stories().await),
            StepAction::Delete {
                target,
            } => match resolve_target(target, context) {
                Some(id) => Dispatch::Sent(self.api.delete_story(&id).await),
                None => Dispatch::MissingCapture,
            },
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves an identifier reference against the run context.
fn resolve_target(target: &IdRef, context: &ScenarioContext) -> Option<StoryId> {
    match target {
        IdRef::Captured => context.captured_id().cloned(),
        IdRef::Literal {
            id,
        } => Some(id.clone()),
    }
}

/// Extracts a capturable identifier from a step response.
fn capture_from(result: &ApiResult) -> Option<StoryId> {
    result.json::<StoryRecord>().ok().filter(StoryRecord::has_id).and_then(|record| record.id)
}

/// Converts elapsed time since `started` into whole milliseconds.
fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
