/// Whole-document assembly.
///
/// A converted document is the title banner, the table of contents built from
/// the headings detected while rendering, and the rendered body, in that order.
use super::config::MarkdownOptions;
use super::context::RenderContext;
use super::toc::{HeadingRecord, render_toc};
use super::writer::MarkdownWriter;
use crate::ooxml::docx::{Body, ImageRegistry};
use crate::ooxml::opc::RelationshipTables;
use std::fmt::Write as FmtWrite;
use tracing::debug;

/// The Markdown of one document together with the headings found in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Complete Markdown output
    pub markdown: String,
    /// Headings in document order
    pub headings: HeadingRecord,
}

/// Render only the body blocks, appending detected headings to `headings`.
pub fn render_body(
    body: &Body,
    rels: &RelationshipTables,
    images: &ImageRegistry,
    options: &MarkdownOptions,
    headings: &mut HeadingRecord,
) -> String {
    let mut writer = MarkdownWriter::new(RenderContext::new(rels, images, options, headings));
    writer.write_body(body);
    writer.finish()
}

/// Render a parsed `.docx` body into a complete Markdown document.
///
/// `name` is the document title, usually the input file stem. Rendering the same
/// tree twice gives identical output: all state lives in the returned value.
///
/// # Examples
///
/// ```rust
/// use docmark::markdown::{MarkdownOptions, render_document};
/// use docmark::ooxml::docx::{Block, Body, ImageRegistry, Paragraph, Run, StyleFlags};
/// use docmark::ooxml::opc::RelationshipTables;
///
/// let body = Body::from_blocks(vec![
///     Block::Paragraph(Paragraph::new().with_run(Run::new("Overview", StyleFlags::BOLD))),
///     Block::Paragraph(Paragraph::new().with_run(Run::new("Some text.", StyleFlags::empty()))),
/// ]);
/// let doc = render_document(
///     "notes",
///     &body,
///     &RelationshipTables::new(),
///     &ImageRegistry::new(),
///     &MarkdownOptions::default(),
/// );
/// assert_eq!(
///     doc.markdown,
///     "# notes\n\n*Document Type: DOCX*\n\n## Table of Contents\n\n- [Overview](#overview)\n\n## Overview\n\nSome text.\n\n"
/// );
/// ```
pub fn render_document(
    name: &str,
    body: &Body,
    rels: &RelationshipTables,
    images: &ImageRegistry,
    options: &MarkdownOptions,
) -> RenderedDocument {
    let mut headings = HeadingRecord::new();
    let content = render_body(body, rels, images, options, &mut headings);
    debug!(headings = headings.len(), "rendered document body");
    let markdown = assemble_document(name, "DOCX", &headings, &content, options);
    RenderedDocument { markdown, headings }
}

/// Put the banner, the table of contents and the body together.
///
/// `type_label` is shown in the banner line (`*Document Type: DOCX*`). Content
/// produced elsewhere, such as text scraped from a legacy document, is inserted
/// unchanged.
pub fn assemble_document(
    name: &str,
    type_label: &str,
    headings: &HeadingRecord,
    content: &str,
    options: &MarkdownOptions,
) -> String {
    let mut out = String::with_capacity(content.len() + 256);
    if options.include_banner {
        let _ = write!(out, "# {}\n\n*Document Type: {}*\n\n", name, type_label);
    }
    if options.include_toc {
        out.push_str(&render_toc(headings));
    }
    out.push_str(content);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::{Block, Cell, Paragraph, Row, Run, StyleFlags, Table};

    fn plain(text: &str) -> Block {
        Block::Paragraph(Paragraph::new().with_run(Run::new(text, StyleFlags::empty())))
    }

    #[test]
    fn test_document_without_headings_has_no_toc() {
        let body = Body::from_blocks(vec![plain("Just text.")]);
        let doc = render_document(
            "memo",
            &body,
            &RelationshipTables::new(),
            &ImageRegistry::new(),
            &MarkdownOptions::default(),
        );
        assert_eq!(doc.markdown, "# memo\n\n*Document Type: DOCX*\n\nJust text.\n\n");
        assert!(doc.headings.is_empty());
    }

    #[test]
    fn test_table_block_ends_with_blank_line() {
        let table = Table::new(vec![
            Row::new([Cell::from_text("A"), Cell::from_text("B"), Cell::from_text("C")]),
            Row::new([Cell::from_text("1"), Cell::from_text("2"), Cell::from_text("3")]),
        ]);
        let body = Body::from_blocks(vec![Block::Table(table), plain("after")]);
        let options = MarkdownOptions::new().with_banner(false);
        let doc = render_document("t", &body, &RelationshipTables::new(), &ImageRegistry::new(), &options);
        assert_eq!(doc.markdown, "| A | B | C |\n| --- | --- | --- |\n| 1 | 2 | 3 |\n\nafter\n\n");
    }

    #[test]
    fn test_toc_can_be_disabled() {
        let body = Body::from_blocks(vec![Block::Paragraph(
            Paragraph::new().with_style("Heading1").with_run(Run::new("Top", StyleFlags::empty())),
        )]);
        let options = MarkdownOptions::new().with_toc(false);
        let doc = render_document("d", &body, &RelationshipTables::new(), &ImageRegistry::new(), &options);
        assert_eq!(doc.markdown, "# d\n\n*Document Type: DOCX*\n\n# Top\n\n");
        assert_eq!(doc.headings.len(), 1);
    }

    #[test]
    fn test_assemble_passes_content_through() {
        let mut headings = HeadingRecord::new();
        headings.push(2, "Legacy Title");
        let out = assemble_document("old", "DOC", &headings, "## Legacy Title", &MarkdownOptions::default());
        assert_eq!(
            out,
            "# old\n\n*Document Type: DOC*\n\n## Table of Contents\n\n  - [Legacy Title](#legacy-title)\n\n## Legacy Title"
        );
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let body = Body::from_blocks(vec![
            Block::Paragraph(Paragraph::new().with_run(Run::new("Bold Title", StyleFlags::BOLD))),
            plain("text"),
        ]);
        let rels = RelationshipTables::new();
        let images = ImageRegistry::new();
        let options = MarkdownOptions::default();
        let first = render_document("x", &body, &rels, &images, &options);
        let second = render_document("x", &body, &rels, &images, &options);
        assert_eq!(first, second);
    }
}
