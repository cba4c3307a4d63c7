/// Low-level writer for Markdown generation.
///
/// This module provides the `MarkdownWriter` struct, which walks the blocks of a
/// body in document order and dispatches each to the paragraph or table renderer.
use super::context::RenderContext;
use super::paragraph::render_paragraph;
use super::table::render_table;
use crate::ooxml::docx::{Block, Body};

/// Writer that accumulates the rendered body of one document.
pub struct MarkdownWriter<'a> {
    /// The output buffer
    buffer: String,
    /// Lookups and the heading accumulator for this document
    ctx: RenderContext<'a>,
}

impl<'a> MarkdownWriter<'a> {
    /// Create a new writer over a render context.
    pub fn new(ctx: RenderContext<'a>) -> Self {
        Self {
            buffer: String::with_capacity(4096),
            ctx,
        }
    }

    /// Write one block.
    pub fn write_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(para) => {
                let rendered = render_paragraph(para, &mut self.ctx);
                self.buffer.push_str(&rendered);
            },
            Block::Table(table) => {
                let rendered = render_table(table, &mut self.ctx);
                self.buffer.push_str(&rendered);
            },
        }
    }

    /// Write every block of a body in order.
    pub fn write_body(&mut self, body: &Body) {
        for block in body.blocks() {
            self.write_block(block);
        }
    }

    /// Finish writing and return the rendered Markdown.
    pub fn finish(self) -> String {
        self.buffer
    }
}
