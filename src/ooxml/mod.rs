//! Office Open XML (OOXML) support for Word packages.
//!
//! The module is organized into layers:
//!
//! 1. **OPC layer** (`opc`): package part names and relationship manifests
//! 2. **Shared utilities** (`xml`, `error`): quick-xml helpers and the error type
//! 3. **Word layer** (`docx`): the document body tree, its parser and the package
//!
//! # Example
//!
//! ```rust,no_run
//! use docmark::ooxml::docx::DocxPackage;
//!
//! let mut pkg = DocxPackage::open("document.docx")?;
//! let body = pkg.body()?;
//! println!("Document contains {} blocks", body.blocks().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;
pub(crate) mod xml;

pub use error::{OoxmlError, Result};
pub use opc::RelationshipTables;
