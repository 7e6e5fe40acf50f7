// storyspoiler-client/src/lib.rs
// ============================================================================
// Module: StorySpoiler Client Library
// Description: HTTP transport, authentication, and harness composition.
// Purpose: Drive the core scenario runner against a live story service.
// Dependencies: storyspoiler-core, reqwest, url
// ============================================================================

//! ## Overview
//! The client crate binds the transport-agnostic core to a real story
//! service deployment: it authenticates once, holds the bearer session for
//! the scenario's lifetime, and implements the story API seam over reqwest.
//! Authentication failures are fatal by construction; no step executes
//! without a session.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod auth;
pub mod client;
pub mod harness;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use auth::AuthenticationError;
pub use auth::Credentials;
pub use auth::Session;
pub use auth::authenticate;
pub use client::ApiClient;
pub use client::TranscriptEntry;
pub use client::routes;
pub use harness::HarnessError;
pub use harness::run_scenario;
pub use harness::run_scenario_with_observer;
