//! File format detection utilities.
//!
//! Detection is based on container signatures (magic numbers) only, reading the
//! minimal amount of data required for identification.

// Submodule declarations
pub mod functions;
pub mod types;
pub mod utils;

// Re-exports
pub use functions::{detect_file_format, detect_file_format_from_bytes};
pub use types::FileFormat;
