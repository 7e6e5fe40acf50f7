// storyspoiler-core/src/runtime/checks.rs
// ============================================================================
// Module: Expectation Evaluation
// Description: Status and body-check evaluation for step responses.
// Purpose: Convert a raw step result into labeled assertion outcomes.
// Dependencies: crate::{core, scenario}
// ============================================================================

//! ## Overview
//! Expectation evaluation converts a raw [`ApiResult`] into one
//! [`CheckResult`] per assertion: the status check first, then each body
//! check in spec order. A body that fails to decode fails the check that
//! needed it; evaluation itself never errors, preserving fail-closed
//! reporting.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::story::ApiResult;
use crate::core::story::StoryRecord;
use crate::scenario::report::CheckResult;
use crate::scenario::spec::BodyCheck;
use crate::scenario::spec::StepExpectation;

// ============================================================================
// SECTION: Expectation Evaluation
// ============================================================================

/// Evaluates a step expectation against a raw result.
#[must_use]
pub fn evaluate_expectation(expect: &StepExpectation, result: &ApiResult) -> Vec<CheckResult> {
    let mut checks = Vec::with_capacity(expect.checks.len() + 1);
    checks.push(evaluate_status(expect.status, result.status));
    for check in &expect.checks {
        checks.push(evaluate_body_check(check, result));
    }
    checks
}

/// Compares the observed status code against the expected one.
fn evaluate_status(expected: u16, observed: u16) -> CheckResult {
    if observed == expected {
        CheckResult::pass("status", format!("status is {expected}"))
    } else {
        CheckResult::fail("status", format!("expected status {expected}, got {observed}"))
    }
}

/// Evaluates a single body check against a raw result.
fn evaluate_body_check(check: &BodyCheck, result: &ApiResult) -> CheckResult {
    match check {
        BodyCheck::MessageEquals {
            text,
        } => evaluate_message_equals(text, result),
        BodyCheck::ContainsText {
            text,
        } => evaluate_contains_text(text, result),
        BodyCheck::RecordHasId => evaluate_record_has_id(result),
        BodyCheck::NonEmptyStoryList => evaluate_non_empty_list(result),
    }
}

/// Checks that the decoded record message equals the expected text.
fn evaluate_message_equals(expected: &str, result: &ApiResult) -> CheckResult {
    match result.json::<StoryRecord>() {
        Ok(record) => match record.msg {
            Some(msg) if msg == expected => {
                CheckResult::pass("message", format!("message is {expected:?}"))
            }
            Some(msg) => {
                CheckResult::fail("message", format!("expected message {expected:?}, got {msg:?}"))
            }
            None => CheckResult::fail("message", "response record carries no message"),
        },
        Err(err) => CheckResult::fail("message", format!("body is not a story record: {err}")),
    }
}

/// Checks that the raw body contains the expected text.
fn evaluate_contains_text(expected: &str, result: &ApiResult) -> CheckResult {
    if result.body.contains(expected) {
        CheckResult::pass("body", format!("body contains {expected:?}"))
    } else {
        CheckResult::fail("body", format!("body does not contain {expected:?}"))
    }
}

/// Checks that the decoded record carries a non-empty identifier.
fn evaluate_record_has_id(result: &ApiResult) -> CheckResult {
    match result.json::<StoryRecord>() {
        Ok(record) if record.has_id() => {
            CheckResult::pass("record_id", "response record carries an identifier")
        }
        Ok(_) => {
            CheckResult::fail("record_id", "response record carries no identifier")
        }
        Err(err) => CheckResult::fail("record_id", format!("body is not a story record: {err}")),
    }
}

/// Checks that the body decodes to a non-empty array of story records.
fn evaluate_non_empty_list(result: &ApiResult) -> CheckResult {
    match result.json::<Vec<StoryRecord>>() {
        Ok(stories) if stories.is_empty() => {
            CheckResult::fail("story_list", "story list is empty")
        }
        Ok(stories) => {
            CheckResult::pass("story_list", format!("story list carries {} entries", stories.len()))
        }
        Err(err) => CheckResult::fail("story_list", format!("body is not a story list: {err}")),
    }
}
