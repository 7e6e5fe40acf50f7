// storyspoiler-core/src/runtime/api.rs
// ============================================================================
// Module: Story API Interface
// Description: Transport seam between the runner and a story service backend.
// Purpose: Provide a pluggable async interface for the four story operations.
// Dependencies: crate::core, async-trait, thiserror
// ============================================================================

//! ## Overview
//! The runner drives scenarios through this seam. The production
//! implementation speaks HTTP with a bearer session; test suites substitute
//! in-memory fakes. Implementations return [`ApiError`] only for failures
//! that produce no HTTP response; an error status from the service is a
//! normal [`crate::core::ApiResult`] for expectations to judge.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

use crate::core::identifiers::StoryId;
use crate::core::story::ApiResult;
use crate::core::story::StoryDraft;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Transport-level errors surfaced by a story API implementation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or no response arrived.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Request URL could not be constructed.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Story service operations the runner drives.
#[async_trait]
pub trait StoryApi: Send + Sync {
    /// Creates a story from a draft.
    async fn create_story(&self, draft: &StoryDraft) -> Result<ApiResult, ApiError>;

    /// Replaces the story addressed by `id` with a new draft.
    async fn edit_story(&self, id: &StoryId, draft: &StoryDraft) -> Result<ApiResult, ApiError>;

    /// Lists every story visible to the session.
    async fn list_stories(&self) -> Result<ApiResult, ApiError>;

    /// Deletes the story addressed by `id`.
    async fn delete_story(&self, id: &StoryId) -> Result<ApiResult, ApiError>;
}
