// storyspoiler-core/src/scenario/mod.rs
// ============================================================================
// Module: StorySpoiler Scenario Definitions
// Description: Scenario specifications, body checks, and run reports.
// Purpose: Define the data structures the runner interprets and emits.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! A scenario is an ordered list of steps encoded as plain data. Step order
//! is the single source of sequencing: the runner walks the list front to
//! back, so a step that consumes a captured identifier must appear after the
//! step that captures it, and `ScenarioSpec::validate` enforces exactly
//! that. Reports mirror the spec one entry per step.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod report;
pub mod spec;
pub mod suite;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use report::CheckResult;
pub use report::ScenarioReport;
pub use report::StepOutcome;
pub use report::StepReport;
pub use spec::BodyCheck;
pub use spec::IdRef;
pub use spec::ScenarioSpec;
pub use spec::SpecError;
pub use spec::StepAction;
pub use spec::StepExpectation;
pub use spec::StepSpec;
pub use suite::story_lifecycle_suite;
