/// Word (.docx) document support.
///
/// This module reads the parts of a WordprocessingML package the Markdown
/// converter works from.
///
/// # Architecture
///
/// - `DocxPackage`: the archive, read once into memory
/// - `Body`: the parsed `<w:body>`, a tree of `Block`s and `Inline`s
/// - `ImageRegistry`: output names of the media copied out of the package
///
/// # Example
///
/// ```rust,no_run
/// use docmark::ooxml::docx::{Block, DocxPackage};
///
/// let mut package = DocxPackage::open("document.docx")?;
/// for block in package.body()?.blocks() {
///     match block {
///         Block::Paragraph(para) => println!("Paragraph: {}", para.text()),
///         Block::Table(table) => println!("Table with {} rows", table.rows().len()),
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod body;
pub mod image;
pub mod package;
pub mod parser;

pub use body::{Block, Body, Cell, Drawing, Hyperlink, Inline, Numbering, Paragraph, Row, Run, StyleFlags, Table};
pub use image::{IMAGE_EXTENSIONS, ImageRegistry, is_image_entry, output_file_name};
pub use package::DocxPackage;
pub use parser::parse_body;
