// storyspoiler-core/src/lib.rs
// ============================================================================
// Module: StorySpoiler Core Library
// Description: Public API surface for the StorySpoiler contract harness core.
// Purpose: Expose domain types, scenario definitions, and the step runner.
// Dependencies: crate::{core, scenario, runtime}
// ============================================================================

//! ## Overview
//! StorySpoiler core provides the domain model and execution engine for
//! contract testing a remote story service. Scenarios are plain data
//! structures interpreted by a single runner loop; transports plug in
//! through the [`runtime::StoryApi`] interface rather than being baked in.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod runtime;
pub mod scenario;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::ApiResult;
pub use self::core::StoryDraft;
pub use self::core::StoryId;
pub use self::core::StoryRecord;

pub use runtime::ApiError;
pub use runtime::NoopObserver;
pub use runtime::ScenarioContext;
pub use runtime::ScenarioObserver;
pub use runtime::ScenarioRunner;
pub use runtime::StoryApi;
pub use runtime::evaluate_expectation;
pub use scenario::BodyCheck;
pub use scenario::CheckResult;
pub use scenario::IdRef;
pub use scenario::ScenarioReport;
pub use scenario::ScenarioSpec;
pub use scenario::SpecError;
pub use scenario::StepAction;
pub use scenario::StepExpectation;
pub use scenario::StepOutcome;
pub use scenario::StepReport;
pub use scenario::StepSpec;
pub use scenario::story_lifecycle_suite;
