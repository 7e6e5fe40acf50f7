// storyspoiler-core/src/core/mod.rs
// ============================================================================
// Module: StorySpoiler Core Types
// Description: Canonical story domain and wire-shape structures.
// Purpose: Provide stable, serializable types shared by every harness layer.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types mirror the story service wire contract: drafts submitted on
//! create and edit, records returned by the service, and the raw per-request
//! outcome the runner evaluates expectations against.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod story;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::StoryId;
pub use story::ApiResult;
pub use story::StoryDraft;
pub use story::StoryRecord;
