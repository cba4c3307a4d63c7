//! Docmark - convert Word documents to Markdown
//!
//! This library turns word-processing documents into Markdown, inferring the
//! structure that Word usually only expresses through formatting.
//!
//! # Features
//!
//! - **DOCX conversion**: headings, bold-label sub-headings, list items, tables,
//!   hyperlinks, inline emphasis and inline images
//! - **Image extraction**: media copied out of the package under stable,
//!   sequence-numbered names and linked from the Markdown
//! - **Legacy DOC fallback**: best-effort text scraping for binary `.doc` files
//!   (feature `ole`, on by default)
//! - **Batch mode**: independent files converted in parallel
//!
//! # Example - Converting a file
//!
//! ```no_run
//! use docmark::{ConvertOptions, Converter};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), docmark::Error> {
//! let converter = Converter::new(ConvertOptions::default());
//! let report = converter.convert_file(Path::new("design.docx"), Path::new("out"))?;
//! println!("{} headings, {} images", report.headings.len(), report.images.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Rendering an in-memory tree
//!
//! ```
//! use docmark::markdown::{MarkdownOptions, render_document};
//! use docmark::ooxml::docx::{Block, Body, ImageRegistry, Paragraph, Run, StyleFlags};
//! use docmark::ooxml::opc::RelationshipTables;
//!
//! let body = Body::from_blocks(vec![Block::Paragraph(
//!     Paragraph::new().with_style("Heading1").with_run(Run::new("Scope", StyleFlags::empty())),
//! )]);
//! let options = MarkdownOptions::new().with_banner(false).with_toc(false);
//! let doc = render_document("x", &body, &RelationshipTables::new(), &ImageRegistry::new(), &options);
//! assert_eq!(doc.markdown, "# Scope\n\n");
//! ```

pub mod common;
pub mod converter;
pub mod markdown;
pub mod ooxml;
pub mod report;

/// Legacy OLE2 documents
#[cfg(feature = "ole")]
pub mod ole;

pub use common::{Error, FileFormat, Result, detect_file_format, detect_file_format_from_bytes};
pub use converter::{ConvertOptions, Converter, OutputLayout, convert_file};
pub use markdown::{MarkdownOptions, RenderedDocument, render_document};
pub use report::ConversionReport;
