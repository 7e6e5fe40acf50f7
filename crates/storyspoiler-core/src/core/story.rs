// storyspoiler-core/src/core/story.rs
// ============================================================================
// Module: StorySpoiler Wire Shapes
// Description: Story drafts, service response records, and raw step results.
// Purpose: Define the JSON payloads exchanged with the story service.
// Dependencies: crate::core::identifiers, serde, serde_json
// ============================================================================

//! ## Overview
//! The story service accepts a three-field draft on create and edit and
//! answers most operations with an `{id, msg}` record. Both fields of the
//! record are optional on the wire: the same shape deserializes create
//! acknowledgements, error envelopes, and list items. Step expectations are
//! evaluated against [`ApiResult`], the raw status-plus-body outcome of one
//! exchange, so a body that fails to decode fails a check rather than the
//! harness.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::identifiers::StoryId;

// ============================================================================
// SECTION: Request Payloads
// ============================================================================

/// Story draft submitted on create and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDraft {
    /// Story title.
    pub title: String,
    /// Story body text.
    pub description: String,
    /// Cover image URL; the service accepts an empty string.
    pub url: String,
}

impl StoryDraft {
    /// Creates a draft from its three fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }
}

// ============================================================================
// SECTION: Response Payloads
// ============================================================================

/// Record returned by the story service.
///
/// # Invariants
/// - Unknown wire fields are ignored; absent fields deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRecord {
    /// Identifier assigned by the service; absent on error envelopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StoryId>,
    /// Outcome message; absent on list items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl StoryRecord {
    /// Returns true when the record carries a non-empty identifier.
    #[must_use]
    pub fn has_id(&self) -> bool {
        self.id.as_ref().is_some_and(|id| !id.is_empty())
    }
}

// ============================================================================
// SECTION: Raw Step Results
// ============================================================================

/// Raw outcome of one HTTP exchange: status code plus response body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResult {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl ApiResult {
    /// Creates a result from a status code and body text.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decodes the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying decode error when the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
