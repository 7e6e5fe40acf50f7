// system-tests/src/lib.rs
// ============================================================================
// Module: StorySpoiler System Tests Library
// Description: Shared configuration and helpers for system test scenarios.
// Purpose: Provide common utilities for StorySpoiler system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration and helper utilities used by the
//! StorySpoiler system-tests binaries in `system-tests/tests`. Suites run
//! hermetically against a local story stub unless the `live-tests` feature
//! points them at a real deployment.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
