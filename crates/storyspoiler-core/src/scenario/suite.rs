// storyspoiler-core/src/scenario/suite.rs
// ============================================================================
// Module: StorySpoiler Built-in Suite
// Description: Canonical story lifecycle scenario.
// Purpose: Define the ordered create/edit/list/delete contract sequence as data.
// Dependencies: crate::{core, scenario::spec}
// ============================================================================

//! ## Overview
//! The lifecycle suite exercises the full story contract in seven ordered
//! steps: a happy-path create/edit/list/delete chain threaded through one
//! captured identifier, followed by three negative probes against invalid
//! payloads and missing identifiers. The deletion probe targets an
//! identifier that never exists, so the step is repeatable across runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::StoryId;
use crate::core::story::StoryDraft;
use crate::scenario::spec::BodyCheck;
use crate::scenario::spec::IdRef;
use crate::scenario::spec::ScenarioSpec;
use crate::scenario::spec::StepAction;
use crate::scenario::spec::StepExpectation;
use crate::scenario::spec::StepSpec;

// ============================================================================
// SECTION: Wire Literals
// ============================================================================

/// Message returned by the service on successful create.
pub const MSG_CREATED: &str = "Successfully created!";

/// Message returned by the service on successful delete.
pub const MSG_DELETED: &str = "Deleted successfully!";

/// Message returned when an edit targets a missing story.
pub const MSG_EDIT_MISSING: &str = "No spoilers...";

/// Message returned when a delete targets a missing story.
pub const MSG_DELETE_MISSING: &str = "Unable to delete this story spoiler!";

/// Identifier no story ever carries, used by the missing-edit probe.
const MISSING_EDIT_ID: &str = "524";

/// Identifier no story ever carries, used by the missing-delete probe.
const MISSING_DELETE_ID: &str = "42442";

// ============================================================================
// SECTION: Built-in Suite
// ============================================================================

/// Returns the canonical seven-step story lifecycle scenario.
#[must_use]
pub fn story_lifecycle_suite() -> ScenarioSpec {
    ScenarioSpec {
        name: "story-lifecycle".to_string(),
        steps: vec![
            StepSpec {
                name: "create".to_string(),
                action: StepAction::Create {
                    draft: StoryDraft::new("New Story", "Test story description", ""),
                },
                expect: StepExpectation::status(201)
                    .with_check(BodyCheck::MessageEquals {
                        text: MSG_CREATED.to_string(),
                    })
                    .with_check(BodyCheck::RecordHasId),
                capture_id: true,
            },
            StepSpec {
                name: "edit".to_string(),
                action: StepAction::Edit {
                    target: IdRef::Captured,
                    draft: StoryDraft::new("Edited Title", "Some Description", ""),
                },
                expect: StepExpectation::status(200),
                capture_id: false,
            },
            StepSpec {
                name: "list-all".to_string(),
                action: StepAction::List,
                expect: StepExpectation::status(200).with_check(BodyCheck::NonEmptyStoryList),
                capture_id: false,
            },
            StepSpec {
                name: "delete".to_string(),
                action: StepAction::Delete {
                    target: IdRef::Captured,
                },
                expect: StepExpectation::status(200).with_check(BodyCheck::ContainsText {
                    text: MSG_DELETED.to_string(),
                }),
                capture_id: false,
            },
            StepSpec {
                name: "create-missing-fields".to_string(),
                action: StepAction::Create {
                    draft: StoryDraft::new("", "", ""),
                },
                expect: StepExpectation::status(400),
                capture_id: false,
            },
            StepSpec {
                name: "edit-missing-story".to_string(),
                action: StepAction::Edit {
                    target: IdRef::Literal {
                        id: StoryId::new(MISSING_EDIT_ID),
                    },
                    draft: StoryDraft::new("Edited Title", "Some Description", ""),
                },
                expect: StepExpectation::status(404).with_check(BodyCheck::ContainsText {
                    text: MSG_EDIT_MISSING.to_string(),
                }),
                capture_id: false,
            },
            StepSpec {
                name: "delete-missing-story".to_string(),
                action: StepAction::Delete {
                    target: IdRef::Literal {
                        id: StoryId::new(MISSING_DELETE_ID),
                    },
                },
                expect: StepExpectation::status(400).with_check(BodyCheck::ContainsText {
                    text: MSG_DELETE_MISSING.to_string(),
                }),
                capture_id: false,
            },
        ],
    }
}
