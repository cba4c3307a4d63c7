/// Markdown rendering of Word document trees.
///
/// This module turns a parsed document body into Markdown. Structure that Word
/// only expresses through formatting (bold lines used as headings, `Label:`
/// prefixes, tables used for layout) is inferred and rendered as real Markdown
/// structure.
///
/// # Quick Start
///
/// ```rust,no_run
/// use docmark::markdown::{MarkdownOptions, render_document};
/// use docmark::ooxml::docx::DocxPackage;
///
/// # fn main() -> Result<(), docmark::Error> {
/// let mut pkg = DocxPackage::open("report.docx")?;
/// let body = pkg.body()?;
/// let rels = pkg.relationships()?;
/// let images = pkg.extract_images("out/images".as_ref())?;
/// let doc = render_document("report", &body, &rels, &images, &MarkdownOptions::default());
/// println!("{}", doc.markdown);
/// # Ok(())
/// # }
/// ```
///
/// # Architecture
///
/// - [`inline`]: runs, emphasis and hyperlinks
/// - [`drawing`]: image links for drawings
/// - [`paragraph`]: the ordered paragraph rules
/// - [`table`]: table shapes and their renderings
/// - [`toc`]: the heading record and table of contents
/// - [`document`]: banner, table of contents and body assembly
/// - [`config`]: [`MarkdownOptions`]
pub mod config;
pub mod context;
pub mod document;
pub mod drawing;
pub mod inline;
pub mod paragraph;
pub mod table;
pub mod toc;
pub mod writer;

pub use config::MarkdownOptions;
pub use context::RenderContext;
pub use document::{RenderedDocument, assemble_document, render_body, render_document};
pub use drawing::{render_drawing, resolve_image};
pub use inline::{render_hyperlink, render_inlines, render_runs, wrap_emphasis};
pub use paragraph::{ParagraphFeatures, ParagraphKind, classify_paragraph, render_paragraph};
pub use table::{TableShape, classify_table, format_description, render_table};
pub use toc::{Heading, HeadingRecord, anchor, render_toc};
pub use writer::MarkdownWriter;
