//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure including:
//! - Fixed clocks, secrets and environments
//! - Custom assertions for canonical bodies and signature headers

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
