//! Unified error types for docmark.
//!
//! This module provides a unified error type that encompasses errors from both
//! the OOXML package reader and the conversion driver, presenting a consistent
//! API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
