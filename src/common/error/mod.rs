//! Unified error types for the Longan library.
//!
//! This module provides a single error type spanning I/O, codec, and
//! document-policy failures, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
