/// Per-conversion render state.
///
/// Everything a render step may consult or accumulate is reached through a
/// [`RenderContext`] passed down the traversal; the renderer itself keeps no
/// state between documents.
use super::config::MarkdownOptions;
use super::toc::HeadingRecord;
use crate::ooxml::docx::ImageRegistry;
use crate::ooxml::opc::RelationshipTables;

/// Explicit context threaded through the render of one document.
///
/// Relationship tables, the image registry and the options are read-only; the
/// heading record is the single accumulator and is appended to in traversal order.
pub struct RenderContext<'a> {
    /// Hyperlink and image relationship lookups
    pub rels: &'a RelationshipTables,
    /// Output names of the images extracted for this document
    pub images: &'a ImageRegistry,
    /// Rendering options
    pub options: &'a MarkdownOptions,
    /// Headings detected so far
    pub headings: &'a mut HeadingRecord,
}

impl<'a> RenderContext<'a> {
    /// Create a context over the given lookups and accumulator.
    pub fn new(
        rels: &'a RelationshipTables,
        images: &'a ImageRegistry,
        options: &'a MarkdownOptions,
        headings: &'a mut HeadingRecord,
    ) -> Self {
        Self {
            rels,
            images,
            options,
            headings,
        }
    }
}
