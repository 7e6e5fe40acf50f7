// storyspoiler-cli/src/lib.rs
// ============================================================================
// Module: StorySpoiler CLI Library
// Description: Shared helpers for the StorySpoiler command-line interface.
// Purpose: Provide reusable components (config, rendering) for the binary and tests.
// Dependencies: storyspoiler-core, serde, toml, url
// ============================================================================

//! ## Overview
//! This library module houses the configuration loader and the plain-text
//! renderers for scenario output. The binary entry point (`src/main.rs`)
//! imports these helpers so integration tests can exercise them without
//! spawning the binary.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Configuration loading and validation.
pub mod config;

/// Plain-text rendering of scenario steps and reports.
pub mod render;
