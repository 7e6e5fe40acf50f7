// storyspoiler-core/src/scenario/spec.rs
// ============================================================================
// Module: StorySpoiler Scenario Specification
// Description: Step, action, and expectation specifications.
// Purpose: Define canonical scenario specs with validation helpers.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! Scenario specifications define an ordered contract-test sequence against
//! the story service. Each step names one operation, the response it
//! expects, and whether the response's identifier is captured for later
//! steps. Specs are validated at runner construction to enforce invariants
//! such as unique step names and capture-before-use ordering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::StoryId;
use crate::core::story::StoryDraft;

// ============================================================================
// SECTION: Scenario Specification
// ============================================================================

/// Canonical scenario specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Scenario name used in reports.
    pub name: String,
    /// Steps in execution order.
    pub steps: Vec<StepSpec>,
}

impl ScenarioSpec {
    /// Validates the scenario specification invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when validation fails.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.steps.is_empty() {
            return Err(SpecError::MissingSteps);
        }

        ensure_step_names_nonempty(&self.steps)?;
        ensure_unique_step_names(&self.steps)?;
        ensure_captures_precede_references(&self.steps)?;

        Ok(())
    }
}

/// One ordered step of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    /// Step name, unique within the scenario.
    pub name: String,
    /// Operation the step performs.
    pub action: StepAction,
    /// Expected response.
    pub expect: StepExpectation,
    /// Whether the response identifier is captured for later steps.
    pub capture_id: bool,
}

// ============================================================================
// SECTION: Step Actions
// ============================================================================

/// Operation a step performs against the story service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepAction {
    /// Create a story from a draft.
    Create {
        /// Draft payload to submit.
        draft: StoryDraft,
    },
    /// Replace the story addressed by `target` with a new draft.
    Edit {
        /// Story to edit.
        target: IdRef,
        /// Replacement draft payload.
        draft: StoryDraft,
    },
    /// List every story visible to the session.
    List,
    /// Delete the story addressed by `target`.
    Delete {
        /// Story to delete.
        target: IdRef,
    },
}

impl StepAction {
    /// Returns the identifier reference the action addresses, if any.
    #[must_use]
    pub const fn target(&self) -> Option<&IdRef> {
        match self {
            Self::Edit {
                target, ..
            }
            | Self::Delete {
                target,
            } => Some(target),
            Self::Create {
                ..
            }
            | Self::List => None,
        }
    }
}

/// Reference to a story identifier used by edit and delete steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdRef {
    /// Resolves to the identifier captured earlier in the run.
    Captured,
    /// Fixed identifier embedded in the step definition.
    Literal {
        /// Identifier value.
        id: StoryId,
    },
}

// ============================================================================
// SECTION: Step Expectations
// ============================================================================

/// Expected response for a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepExpectation {
    /// Expected HTTP status code.
    pub status: u16,
    /// Body assertions applied after the status check.
    pub checks: Vec<BodyCheck>,
}

impl StepExpectation {
    /// Creates an expectation asserting only the status code.
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self {
            status,
            checks: Vec::new(),
        }
    }

    /// Appends a body check to the expectation.
    #[must_use]
    pub fn with_check(mut self, check: BodyCheck) -> Self {
        self.checks.push(check);
        self
    }
}

/// Body assertion applied to a step response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyCheck {
    /// Body decodes to a record whose message equals the expected text.
    MessageEquals {
        /// Expected message text.
        text: String,
    },
    /// Raw body contains the expected text.
    ContainsText {
        /// Expected substring.
        text: String,
    },
    /// Body decodes to a record carrying a non-empty identifier.
    RecordHasId,
    /// Body decodes to a non-empty array of story records.
    NonEmptyStoryList,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Scenario specification validation errors.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Specification contains no steps.
    #[error("scenario spec must define at least one step")]
    MissingSteps,
    /// A step name is empty.
    #[error("step names must not be empty")]
    EmptyStepName,
    /// Duplicate step names detected.
    #[error("duplicate step name: {0}")]
    DuplicateStepName(String),
    /// A step consumes a captured identifier before any step captures one.
    #[error("step references a captured identifier before any capturing step: {0}")]
    UncapturedReference(String),
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Ensures every step carries a non-empty name.
fn ensure_step_names_nonempty(steps: &[StepSpec]) -> Result<(), SpecError> {
    if steps.iter().any(|step| step.name.trim().is_empty()) {
        return Err(SpecError::EmptyStepName);
    }
    Ok(())
}

/// Ensures step names are unique within the spec.
fn ensure_unique_step_names(steps: &[StepSpec]) -> Result<(), SpecError> {
    for (index, step) in steps.iter().enumerate() {
        if steps.iter().skip(index + 1).any(|other| other.name == step.name) {
            return Err(SpecError::DuplicateStepName(step.name.clone()));
        }
    }
    Ok(())
}

/// Ensures captured-identifier references appear only after a capturing step.
fn ensure_captures_precede_references(steps: &[StepSpec]) -> Result<(), SpecError> {
    let mut capture_seen = false;
    for step in steps {
        if matches!(step.action.target(), Some(IdRef::Captured)) && !capture_seen {
            return Err(SpecError::UncapturedReference(step.name.clone()));
        }
        if step.capture_id {
            capture_seen = true;
        }
    }
    Ok(())
}
