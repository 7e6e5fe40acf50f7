// storyspoiler-core/src/runtime/mod.rs
// ============================================================================
// Module: StorySpoiler Runtime
// Description: Story API seam, check evaluation, and the scenario runner.
// Purpose: Execute scenario specs step by step against any story API backend.
// Dependencies: crate::{core, scenario}, async-trait, thiserror
// ============================================================================

//! ## Overview
//! The runtime interprets a validated [`crate::scenario::ScenarioSpec`]
//! against an implementation of the [`StoryApi`] seam. The runner is the
//! single canonical execution path: the CLI and every test suite drive
//! scenarios through it so sequencing and capture semantics cannot drift
//! between surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod api;
pub mod checks;
pub mod observer;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use api::ApiError;
pub use api::StoryApi;
pub use checks::evaluate_expectation;
pub use observer::NoopObserver;
pub use observer::ScenarioObserver;
pub use runner::ScenarioContext;
pub use runner::ScenarioRunner;
