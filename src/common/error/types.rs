//! Unified error types for docmark.
//!
//! This module provides the crate-level error type returned by conversion entry
//! points. Format-specific errors (see [`crate::ooxml::error::OoxmlError`]) are
//! folded into it by the conversions in [`super::conversions`].
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docmark operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// File is neither a ZIP package nor an OLE2 compound file
    #[error("Not a recognized Word document: {}", .0.display())]
    NotOfficeFile(PathBuf),

    /// Required part of the package is missing
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Invalid configuration file or value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Feature disabled at compile time
    #[error("Feature '{0}' is disabled. Enable it with --features {0}")]
    FeatureDisabled(String),

    /// Two conversions in one batch would write the same output location
    #[error("Output conflict: {} is targeted by more than one input", .0.display())]
    OutputConflict(PathBuf),
}

/// Result type for docmark operations.
pub type Result<T> = std::result::Result<T, Error>;
