//! Common types and utilities shared across formats.
//!
//! This module provides the unified error type and container detection used by
//! both the OOXML (modern) and OLE2 (legacy) conversion paths.

// Submodule declarations
pub mod detection;
pub mod error;

// Re-exports for convenience
pub use detection::{FileFormat, detect_file_format, detect_file_format_from_bytes};
pub use error::{Error, Result};
