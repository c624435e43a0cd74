//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims intake test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built request payloads and login inputs
//! - `assertions`: Custom assertion helpers for document numbers and response envelopes
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use assertions::*;
pub use generators::*;
