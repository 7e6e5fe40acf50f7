// storyspoiler-client/src/harness.rs
// ============================================================================
// Module: Scenario Harness
// Description: One-call composition of authentication, client, and runner.
// Purpose: Acquire a session, drive a scenario, and release the session.
// Dependencies: crate::{auth, client}, storyspoiler-core
// ============================================================================

//! ## Overview
//! The harness is the scoped-resource boundary of a run: it authenticates
//! once before the first step, hands the session to a client that owns it for
//! exactly the scenario's duration, and drops both when the report is built.
//! Failures split into two tiers. Anything that prevents the run from
//! starting (bad credentials, login failure, client construction, an invalid
//! spec) surfaces as a [`HarnessError`] and no step executes. Once the runner
//! starts, per-step failures live inside the returned report and never abort
//! the sequence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use storyspoiler_core::ApiError;
use storyspoiler_core::NoopObserver;
use storyspoiler_core::ScenarioObserver;
use storyspoiler_core::ScenarioReport;
use storyspoiler_core::ScenarioRunner;
use storyspoiler_core::ScenarioSpec;
use storyspoiler_core::SpecError;
use thiserror::Error;
use url::Url;

use crate::auth::AuthenticationError;
use crate::auth::Credentials;
use crate::auth::authenticate;
use crate::client::ApiClient;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal failures that prevent a scenario run from starting.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Authentication failed; no session exists and no step may run.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
    /// The HTTP client could not be constructed.
    #[error("client setup failed: {0}")]
    Client(ApiError),
    /// The scenario specification failed validation.
    #[error(transparent)]
    Spec(#[from] SpecError),
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Runs a scenario against a live deployment with no progress observer.
///
/// # Errors
///
/// Returns [`HarnessError`] when authentication, client construction, or
/// spec validation fails before the first step.
pub async fn run_scenario(
    base_url: &Url,
    credentials: &Credentials,
    timeout: Duration,
    spec: &ScenarioSpec,
) -> Result<ScenarioReport, HarnessError> {
    run_scenario_with_observer(base_url, credentials, timeout, spec, NoopObserver).await
}

/// Runs a scenario against a live deployment, reporting progress to
/// `observer`.
///
/// # Errors
///
/// Returns [`HarnessError`] when authentication, client construction, or
/// spec validation fails before the first step.
pub async fn run_scenario_with_observer<O: ScenarioObserver>(
    base_url: &Url,
    credentials: &Credentials,
    timeout: Duration,
    spec: &ScenarioSpec,
    observer: O,
) -> Result<ScenarioReport, HarnessError> {
    let session = authenticate(base_url, credentials, timeout).await?;
    let client =
        ApiClient::new(base_url.clone(), session, timeout).map_err(HarnessError::Client)?;
    let runner = ScenarioRunner::with_observer(spec.clone(), client, observer)?;
    Ok(runner.run().await)
}
