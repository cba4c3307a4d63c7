//! Streaming reader that turns `word/document.xml` into a [`Body`] tree.
//!
//! The reader walks quick-xml events once, descending into paragraphs, runs,
//! hyperlinks and tables as they open. Wrapper elements it has no use for
//! (`w:sdt`, `w:ins`, `w:smartTag`, `w:fldSimple`, ...) are transparent: their
//! children are read as if they were direct children of the enclosing node.
//! Subtrees whose content must not surface as body text are skipped whole:
//! deleted content, the fallback branch of alternate content, revision records of
//! properties and section properties.

use super::body::{Block, Body, Cell, Drawing, Hyperlink, Inline, Numbering, Paragraph, Row, Run, StyleFlags, Table};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xml::{attr_value, push_reference, push_text, toggle_is_on};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use tracing::trace;

/// Parse the body of a main document part.
///
/// A document without a `<w:body>` yields an empty body. Malformed XML is an
/// error: the package cannot be converted at all.
///
/// # Examples
///
/// ```rust
/// use docmark::ooxml::docx::{Block, parse_body};
///
/// let xml = br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body>
/// </w:document>"#;
/// let body = parse_body(xml).unwrap();
/// assert_eq!(body.blocks().len(), 1);
/// assert!(matches!(body.blocks()[0], Block::Paragraph(_)));
/// ```
pub fn parse_body(xml: &[u8]) -> Result<Body> {
    let mut reader = BodyReader::new(xml);
    loop {
        match reader.next()? {
            Event::Start(e) if e.local_name().as_ref() == b"body" => {
                let body = reader.read_blocks()?;
                trace!(blocks = body.blocks().len(), "parsed document body");
                return Ok(body);
            },
            Event::Eof => return Ok(Body::new()),
            _ => {},
        }
    }
}

/// `w:r`, but not `m:r` (math runs share the local name).
#[inline]
fn is_word_run(name: QName<'_>) -> bool {
    matches!(name.as_ref(), b"w:r" | b"r")
}

/// Elements whose subtree never contributes to the rendered body.
#[inline]
fn is_skipped_subtree(local: &[u8]) -> bool {
    matches!(
        local,
        b"del" | b"moveFrom" | b"Fallback" | b"rPrChange" | b"pPrChange" | b"sectPr" | b"oMath" | b"oMathPara"
    )
}

/// Append the character a run-level `w:tab`, `w:br` or `w:cr` stands for.
#[inline]
fn push_break(out: &mut String, local: &[u8]) {
    match local {
        b"tab" => out.push('\t'),
        b"br" | b"cr" => out.push('\n'),
        _ => {},
    }
}

/// Elements that hold an image reference somewhere in their subtree.
#[inline]
fn is_drawing_container(local: &[u8]) -> bool {
    matches!(local, b"drawing" | b"pict" | b"object")
}

struct BodyReader<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> BodyReader<'a> {
    fn new(xml: &'a [u8]) -> Self {
        // trim_text stays off: whitespace inside w:t is content
        Self {
            reader: Reader::from_reader(xml),
        }
    }

    fn next(&mut self) -> Result<Event<'a>> {
        self.reader.read_event().map_err(|e| {
            OoxmlError::Xml(format!("{} at byte {}", e, self.reader.buffer_position()))
        })
    }

    fn unexpected_eof(element: &str) -> OoxmlError {
        OoxmlError::Xml(format!("unexpected end of document inside <w:{}>", element))
    }

    /// Consume events up to and including the end of an element whose start was
    /// just read.
    fn skip(&mut self, local: &[u8]) -> Result<()> {
        let mut depth = 1usize;
        loop {
            match self.next()? {
                Event::Start(e) if e.local_name().as_ref() == local => depth += 1,
                Event::End(e) if e.local_name().as_ref() == local => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                },
                Event::Eof => return Err(Self::unexpected_eof(&String::from_utf8_lossy(local))),
                _ => {},
            }
        }
    }

    fn read_blocks(&mut self) -> Result<Body> {
        let mut body = Body::new();
        loop {
            match self.next()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"p" => body.push(Block::Paragraph(self.read_paragraph()?)),
                    b"tbl" => body.push(Block::Table(self.read_table()?)),
                    local if is_skipped_subtree(local) => self.skip(local)?,
                    _ => {},
                },
                Event::Empty(e) if e.local_name().as_ref() == b"p" => {
                    body.push(Block::Paragraph(Paragraph::new()));
                },
                Event::End(e) if e.local_name().as_ref() == b"body" => return Ok(body),
                Event::Eof => return Err(Self::unexpected_eof("body")),
                _ => {},
            }
        }
    }

    fn read_paragraph(&mut self) -> Result<Paragraph> {
        let mut para = Paragraph::new();
        loop {
            match self.next()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"pPr" => self.read_paragraph_properties(&mut para)?,
                    b"hyperlink" => {
                        let r_id = attr_value(&e, b"id");
                        let runs = self.read_hyperlink_runs()?;
                        para.push(Inline::Hyperlink(Hyperlink::new(r_id, runs)));
                    },
                    b"r" if is_word_run(e.name()) => para.push(Inline::Run(self.read_run()?)),
                    local if is_drawing_container(local) => {
                        if let Some(drawing) = self.read_drawing(local)? {
                            para.push(Inline::Drawing(drawing));
                        }
                    },
                    local if is_skipped_subtree(local) => self.skip(local)?,
                    _ => {},
                },
                Event::End(e) if e.local_name().as_ref() == b"p" => return Ok(para),
                Event::Eof => return Err(Self::unexpected_eof("p")),
                _ => {},
            }
        }
    }

    fn read_paragraph_properties(&mut self, para: &mut Paragraph) -> Result<()> {
        let mut style = None;
        let mut numbering: Option<Numbering> = None;
        loop {
            match self.next()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"pStyle" => style = attr_value(&e, b"val"),
                    b"numPr" => numbering = Some(numbering.unwrap_or_default()),
                    // paragraph-mark formatting and revision records
                    local @ (b"rPr" | b"pPrChange" | b"sectPr") => self.skip(local)?,
                    _ => {},
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"pStyle" => style = attr_value(&e, b"val"),
                    b"numPr" => numbering = Some(numbering.unwrap_or_default()),
                    b"ilvl" => {
                        if let Some(num) = numbering.as_mut() {
                            num.level = attr_value(&e, b"val")
                                .and_then(|v| v.parse().ok())
                                .unwrap_or(0);
                        }
                    },
                    b"numId" => {
                        if let Some(num) = numbering.as_mut() {
                            num.num_id = attr_value(&e, b"val");
                        }
                    },
                    _ => {},
                },
                Event::End(e) if e.local_name().as_ref() == b"pPr" => break,
                Event::Eof => return Err(Self::unexpected_eof("pPr")),
                _ => {},
            }
        }

        // numId 0 removes numbering inherited from the style
        if numbering.as_ref().and_then(|n| n.num_id.as_deref()) == Some("0") {
            numbering = None;
        }
        para.set_style(style);
        para.set_numbering(numbering);
        Ok(())
    }

    fn read_hyperlink_runs(&mut self) -> Result<Vec<Run>> {
        let mut runs = Vec::new();
        let mut depth = 1usize;
        loop {
            match self.next()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"r" if is_word_run(e.name()) => runs.push(self.read_run()?),
                    b"hyperlink" => depth += 1,
                    local if is_skipped_subtree(local) => self.skip(local)?,
                    _ => {},
                },
                Event::End(e) if e.local_name().as_ref() == b"hyperlink" => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(runs);
                    }
                },
                Event::Eof => return Err(Self::unexpected_eof("hyperlink")),
                _ => {},
            }
        }
    }

    fn read_run(&mut self) -> Result<Run> {
        let mut run = Run::default();
        loop {
            match self.next()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"rPr" => run.set_style(self.read_run_properties()?),
                    b"t" => self.read_text(b"t", run.text_mut())?,
                    local if is_drawing_container(local) => {
                        if let Some(drawing) = self.read_drawing(local)? {
                            run.push_drawing(drawing);
                        }
                    },
                    // field instructions and deleted text are not display text
                    local @ (b"instrText" | b"delText" | b"delInstrText") => self.skip(local)?,
                    local @ (b"tab" | b"br" | b"cr") => {
                        push_break(run.text_mut(), local);
                        self.skip(local)?;
                    },
                    local if is_skipped_subtree(local) => self.skip(local)?,
                    _ => {},
                },
                Event::Empty(e) => push_break(run.text_mut(), e.local_name().as_ref()),
                Event::End(e) if is_word_run(e.name()) => return Ok(run),
                Event::Eof => return Err(Self::unexpected_eof("r")),
                _ => {},
            }
        }
    }

    fn read_run_properties(&mut self) -> Result<StyleFlags> {
        let mut style = StyleFlags::empty();
        loop {
            match self.next()? {
                Event::Start(e) if e.local_name().as_ref() == b"rPrChange" => self.skip(b"rPrChange")?,
                Event::Start(e) | Event::Empty(e) => apply_run_property(&mut style, &e),
                Event::End(e) if e.local_name().as_ref() == b"rPr" => return Ok(style),
                Event::Eof => return Err(Self::unexpected_eof("rPr")),
                _ => {},
            }
        }
    }

    fn read_text(&mut self, local: &[u8], out: &mut String) -> Result<()> {
        loop {
            match self.next()? {
                Event::Text(e) => push_text(out, &e),
                Event::GeneralRef(e) => push_reference(out, &e),
                Event::CData(e) => out.push_str(&String::from_utf8_lossy(e.as_ref())),
                Event::End(e) if e.local_name().as_ref() == local => return Ok(()),
                Event::Eof => return Err(Self::unexpected_eof(&String::from_utf8_lossy(local))),
                _ => {},
            }
        }
    }

    /// Read a drawing container and return the first image reference inside it.
    fn read_drawing(&mut self, local: &[u8]) -> Result<Option<Drawing>> {
        let mut r_embed: Option<String> = None;
        let mut depth = 1usize;
        loop {
            match self.next()? {
                Event::Start(e) => {
                    let name = e.local_name();
                    if name.as_ref() == local {
                        depth += 1;
                    } else if name.as_ref() == b"Fallback" {
                        self.skip(b"Fallback")?;
                        continue;
                    }
                    if r_embed.is_none() {
                        r_embed = image_reference(&e);
                    }
                },
                Event::Empty(e) => {
                    if r_embed.is_none() {
                        r_embed = image_reference(&e);
                    }
                },
                Event::End(e) if e.local_name().as_ref() == local => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(r_embed.filter(|id| !id.is_empty()).map(Drawing::new));
                    }
                },
                Event::Eof => return Err(Self::unexpected_eof(&String::from_utf8_lossy(local))),
                _ => {},
            }
        }
    }

    fn read_table(&mut self) -> Result<Table> {
        let mut table = Table::default();
        loop {
            match self.next()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tr" => table.push_row(self.read_row()?),
                    local @ (b"tblPr" | b"tblGrid") => self.skip(local)?,
                    local if is_skipped_subtree(local) => self.skip(local)?,
                    _ => {},
                },
                Event::End(e) if e.local_name().as_ref() == b"tbl" => return Ok(table),
                Event::Eof => return Err(Self::unexpected_eof("tbl")),
                _ => {},
            }
        }
    }

    fn read_row(&mut self) -> Result<Row> {
        let mut row = Row::default();
        loop {
            match self.next()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tc" => row.push_cell(self.read_cell()?),
                    local @ (b"trPr" | b"tblPrEx") => self.skip(local)?,
                    local if is_skipped_subtree(local) => self.skip(local)?,
                    _ => {},
                },
                Event::Empty(e) if e.local_name().as_ref() == b"tc" => row.push_cell(Cell::default()),
                Event::End(e) if e.local_name().as_ref() == b"tr" => return Ok(row),
                Event::Eof => return Err(Self::unexpected_eof("tr")),
                _ => {},
            }
        }
    }

    fn read_cell(&mut self) -> Result<Cell> {
        let mut cell = Cell::default();
        loop {
            match self.next()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"p" => cell.push_paragraph(self.read_paragraph()?),
                    b"tbl" => {
                        // nested tables are flattened into the enclosing cell
                        let nested = self.read_table()?;
                        for row in nested.into_rows() {
                            for inner in row.into_cells() {
                                cell.extend_paragraphs(inner.into_paragraphs());
                            }
                        }
                    },
                    b"tcPr" => self.skip(b"tcPr")?,
                    local if is_skipped_subtree(local) => self.skip(local)?,
                    _ => {},
                },
                Event::Empty(e) if e.local_name().as_ref() == b"p" => cell.push_paragraph(Paragraph::new()),
                Event::End(e) if e.local_name().as_ref() == b"tc" => return Ok(cell),
                Event::Eof => return Err(Self::unexpected_eof("tc")),
                _ => {},
            }
        }
    }
}

/// Fold one `w:rPr` child into the style flags.
fn apply_run_property(style: &mut StyleFlags, e: &BytesStart<'_>) {
    match e.local_name().as_ref() {
        b"b" => style.set(StyleFlags::BOLD, toggle_is_on(e)),
        b"i" => style.set(StyleFlags::ITALIC, toggle_is_on(e)),
        b"u" => {
            let on = attr_value(e, b"val").is_none_or(|val| val != "none");
            style.set(StyleFlags::UNDERLINE, on);
        },
        _ => {},
    }
}

/// The image relationship id carried by a DrawingML blip or a VML image.
fn image_reference(e: &BytesStart<'_>) -> Option<String> {
    match e.local_name().as_ref() {
        b"blip" => attr_value(e, b"embed"),
        b"imagedata" => attr_value(e, b"id"),
        _ => None,
    }
}
