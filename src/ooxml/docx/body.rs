//! Document tree for the body of a Word document.
//!
//! The tree is a read-only view of `word/document.xml` after parsing: block-level
//! paragraphs and tables, and inside paragraphs the runs, hyperlinks and drawings
//! in document order. It is produced by [`super::parser::parse_body`] and borrowed
//! by the Markdown renderer.
//!
//! # Example
//!
//! ```rust
//! use docmark::ooxml::docx::{Block, Inline, Paragraph, Run, StyleFlags};
//!
//! let mut para = Paragraph::new();
//! para.push(Inline::Run(Run::new("Hello", StyleFlags::BOLD)));
//! let block = Block::Paragraph(para);
//! assert!(matches!(block, Block::Paragraph(_)));
//! ```
use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    /// Character formatting of a run that has a Markdown rendering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// `<w:b/>`
        const BOLD = 1;
        /// `<w:i/>`
        const ITALIC = 1 << 1;
        /// `<w:u/>` with any value other than `none`
        const UNDERLINE = 1 << 2;
    }
}

/// The parsed `<w:body>` of a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    blocks: Vec<Block>,
}

impl Body {
    /// Create an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body from blocks in document order.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Top-level blocks in document order.
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether the body has no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A block-level node of the body.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `<w:p>`
    Paragraph(Paragraph),
    /// `<w:tbl>`
    Table(Table),
}

/// List membership of a paragraph, from `<w:numPr>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Numbering {
    /// Zero-based list level (`w:ilvl`)
    pub level: u8,
    /// Numbering definition instance (`w:numId`)
    pub num_id: Option<String>,
}

/// A paragraph in a Word document.
///
/// Represents a `<w:p>` element: paragraph-level properties plus the inline
/// content in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    /// Style id from `<w:pStyle w:val="..."/>`
    style: Option<String>,
    /// Numbering properties, when the paragraph is a list item
    numbering: Option<Numbering>,
    /// Runs, hyperlinks and drawings in document order
    content: SmallVec<[Inline; 8]>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paragraph style id.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Mark the paragraph as a list item.
    pub fn with_numbering(mut self, numbering: Numbering) -> Self {
        self.numbering = Some(numbering);
        self
    }

    /// Append an inline node.
    pub fn push(&mut self, inline: Inline) {
        self.content.push(inline);
    }

    /// Append a run and return the paragraph, for building trees in code.
    pub fn with_run(mut self, run: Run) -> Self {
        self.content.push(Inline::Run(run));
        self
    }

    pub(crate) fn set_style(&mut self, style: Option<String>) {
        self.style = style;
    }

    pub(crate) fn set_numbering(&mut self, numbering: Option<Numbering>) {
        self.numbering = numbering;
    }

    /// The style id, if any.
    #[inline]
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// The numbering properties, if the paragraph is a list item.
    #[inline]
    pub fn numbering(&self) -> Option<&Numbering> {
        self.numbering.as_ref()
    }

    /// Inline content in document order.
    #[inline]
    pub fn content(&self) -> &[Inline] {
        &self.content
    }

    /// Every run of the paragraph, including the runs wrapped in hyperlinks.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().flat_map(|inline| {
            let (single, linked): (Option<&Run>, &[Run]) = match inline {
                Inline::Run(run) => (Some(run), &[]),
                Inline::Hyperlink(link) => (None, link.runs()),
                Inline::Drawing(_) => (None, &[]),
            };
            single.into_iter().chain(linked.iter())
        })
    }

    /// Plain text of the paragraph, without any formatting.
    pub fn text(&self) -> String {
        self.runs().map(Run::text).collect()
    }
}

/// An inline node inside a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// `<w:r>`
    Run(Run),
    /// `<w:hyperlink>`
    Hyperlink(Hyperlink),
    /// `<w:drawing>` or `<w:pict>` placed directly in the paragraph
    Drawing(Drawing),
}

/// A run of text sharing one set of character properties.
///
/// Represents a `<w:r>` element. Drawings anchored in the run are kept in the
/// order they appear and are rendered after the run's text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    text: String,
    style: StyleFlags,
    drawings: SmallVec<[Drawing; 1]>,
}

impl Run {
    /// Create a run with text and style.
    pub fn new(text: impl Into<String>, style: StyleFlags) -> Self {
        Self {
            text: text.into(),
            style,
            drawings: SmallVec::new(),
        }
    }

    /// Create a run holding only a drawing.
    pub fn with_drawing(drawing: Drawing) -> Self {
        let mut run = Self::default();
        run.drawings.push(drawing);
        run
    }

    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub(crate) fn set_style(&mut self, style: StyleFlags) {
        self.style = style;
    }

    pub(crate) fn push_drawing(&mut self, drawing: Drawing) {
        self.drawings.push(drawing);
    }

    /// The run text (`w:t` content).
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The run's character formatting.
    #[inline]
    pub fn style(&self) -> StyleFlags {
        self.style
    }

    /// Drawings anchored in this run.
    #[inline]
    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    /// Whether the run carries any text.
    #[inline]
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

/// A hyperlink wrapping one or more runs.
///
/// Represents a `<w:hyperlink>` element. External links carry a relationship id
/// resolved through the document relationship manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hyperlink {
    r_id: Option<String>,
    runs: SmallVec<[Run; 4]>,
}

impl Hyperlink {
    /// Create a hyperlink.
    pub fn new(r_id: Option<String>, runs: impl IntoIterator<Item = Run>) -> Self {
        Self {
            r_id,
            runs: runs.into_iter().collect(),
        }
    }

    /// The relationship id (`r:id`) of the link target.
    #[inline]
    pub fn r_id(&self) -> Option<&str> {
        self.r_id.as_deref()
    }

    /// The wrapped runs.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

/// An inline reference to an embedded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawing {
    /// Relationship id of the image part (`a:blip/@r:embed` or `v:imagedata/@r:id`)
    r_embed: String,
}

impl Drawing {
    /// Create a drawing reference.
    pub fn new(r_embed: impl Into<String>) -> Self {
        Self {
            r_embed: r_embed.into(),
        }
    }

    /// The relationship id of the image part.
    #[inline]
    pub fn r_embed(&self) -> &str {
        &self.r_embed
    }
}

/// A table in a Word document.
///
/// Represents a `<w:tbl>` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create a table from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub(crate) fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Rows in document order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consume the table into its rows.
    pub(crate) fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// A row in a table.
///
/// Represents a `<w:tr>` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: SmallVec<[Cell; 4]>,
}

impl Row {
    /// Create a row from cells.
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    pub(crate) fn push_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Cells in document order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn into_cells(self) -> SmallVec<[Cell; 4]> {
        self.cells
    }
}

/// A cell in a table.
///
/// Represents a `<w:tc>` element. Paragraphs of tables nested in the cell are
/// flattened into the cell in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    paragraphs: Vec<Paragraph>,
}

impl Cell {
    /// Create a cell from paragraphs.
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Create a cell holding one unstyled paragraph of plain text.
    pub fn from_text(text: &str) -> Self {
        let para = if text.is_empty() {
            Paragraph::new()
        } else {
            Paragraph::new().with_run(Run::new(text, StyleFlags::empty()))
        };
        Self::new(vec![para])
    }

    pub(crate) fn push_paragraph(&mut self, para: Paragraph) {
        self.paragraphs.push(para);
    }

    pub(crate) fn extend_paragraphs(&mut self, paras: impl IntoIterator<Item = Paragraph>) {
        self.paragraphs.extend(paras);
    }

    pub(crate) fn into_paragraphs(self) -> Vec<Paragraph> {
        self.paragraphs
    }

    /// Paragraphs in document order.
    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_include_hyperlink_runs() {
        let mut para = Paragraph::new();
        para.push(Inline::Run(Run::new("See ", StyleFlags::empty())));
        para.push(Inline::Hyperlink(Hyperlink::new(
            Some("rId3".to_string()),
            [Run::new("the docs", StyleFlags::BOLD)],
        )));
        para.push(Inline::Drawing(Drawing::new("rId4")));

        assert_eq!(para.runs().count(), 2);
        assert_eq!(para.text(), "See the docs");
    }

    #[test]
    fn test_cell_from_text() {
        let cell = Cell::from_text("Alice");
        assert_eq!(cell.paragraphs().len(), 1);
        assert_eq!(cell.paragraphs()[0].text(), "Alice");

        let empty = Cell::from_text("");
        assert!(empty.paragraphs()[0].content().is_empty());
    }
}
