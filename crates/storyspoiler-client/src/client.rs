// storyspoiler-client/src/client.rs
// ============================================================================
// Module: Story Service HTTP Client
// Description: Bearer-authenticated reqwest transport for the story API.
// Purpose: Implement the story API seam against a live deployment.
// Dependencies: storyspoiler-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! The client owns the bearer session for the scenario's lifetime and speaks
//! the fixed story wire contract: create, edit, list, and delete routes under
//! `/api/Story`. Every story request carries `Authorization: Bearer`; only
//! the login call (in [`crate::auth`]) goes out unauthenticated. Responses
//! are captured as raw status-plus-body results whatever their status code;
//! judging them is the runner's job, not the transport's. An in-memory
//! transcript records each completed exchange for test assertions and report
//! artifacts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use storyspoiler_core::ApiError;
use storyspoiler_core::ApiResult;
use storyspoiler_core::StoryApi;
use storyspoiler_core::StoryDraft;
use storyspoiler_core::StoryId;
use url::Url;

use crate::auth::Session;

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Fixed wire routes of the story service.
pub mod routes {
    use storyspoiler_core::StoryId;

    /// Login endpoint; the only unauthenticated route.
    pub const AUTHENTICATION: &str = "/api/User/Authentication";

    /// Story creation endpoint.
    pub const STORY_CREATE: &str = "/api/Story/Create";

    /// Story listing endpoint.
    pub const STORY_ALL: &str = "/api/Story/All";

    /// Returns the edit route for a story identifier.
    #[must_use]
    pub fn story_edit(id: &StoryId) -> String {
        format!("/api/Story/Edit/{id}")
    }

    /// Returns the delete route for a story identifier.
    #[must_use]
    pub fn story_delete(id: &StoryId) -> String {
        format!("/api/Story/Delete/{id}")
    }
}

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// Record of one completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    /// One-based position of the exchange within the client's lifetime.
    pub sequence: u64,
    /// HTTP method of the request.
    pub method: String,
    /// Request path relative to the base URL.
    pub path: String,
    /// HTTP status of the response.
    pub status: u16,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Bearer-authenticated HTTP client for the story service.
///
/// # Invariants
/// - The session is owned for the client's whole lifetime and never refreshed.
/// - Every request carries the bearer token of that session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL of the story service deployment.
    base_url: Url,
    /// Underlying HTTP client, built once with the run timeout.
    client: Client,
    /// Bearer session attached to every request.
    session: Session,
    /// Completed exchanges in request order.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl ApiClient {
    /// Creates a client owning `session` for the scenario's duration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: Url, session: Session, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Transport(format!("client build failed: {err}")))?;
        Ok(Self {
            base_url,
            client,
            session,
            transcript: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Returns the base URL of the story service deployment.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Issues one bearer-authenticated request and captures its outcome.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&StoryDraft>,
    ) -> Result<ApiResult, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| ApiError::InvalidUrl(format!("{path}: {err}")))?;

        let mut request =
            self.client.request(method.clone(), url).bearer_auth(self.session.token());
        if let Some(draft) = body {
            request = request.json(draft);
        }

        let response =
            request.send().await.map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body =
            response.text().await.map_err(|err| ApiError::Transport(err.to_string()))?;

        self.record(method.as_str(), path, status);
        Ok(ApiResult::new(status, body))
    }

    /// Appends one completed exchange to the transcript.
    fn record(&self, method: &str, path: &str, status: u16) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            method: method.to_string(),
            path: path.to_string(),
            status,
        });
    }
}

// ============================================================================
// SECTION: Story API Implementation
// ============================================================================

#[async_trait]
impl StoryApi for ApiClient {
    async fn create_story(&self, draft: &StoryDraft) -> Result<ApiResult, ApiError> {
        self.send(Method::POST, routes::STORY_CREATE, Some(draft)).await
    }

    async fn edit_story(&self, id: &StoryId, draft: &StoryDraft) -> Result<ApiResult, ApiError> {
        self.send(Method::PUT, &routes::story_edit(id), Some(draft)).await
    }

    async fn list_stories(&self) -> Result<ApiResult, ApiError> {
        self.send(Method::GET, routes::STORY_ALL, None).await
    }

    async fn delete_story(&self, id: &StoryId) -> Result<ApiResult, ApiError> {
        self.send(Method::DELETE, &routes::story_delete(id), None).await
    }
}
