//! Conversion driver.
//!
//! Ties the pieces together for one input file: detect the container, read or
//! scrape the content, extract images, render Markdown and write the outputs.
//! A [`Converter`] holds only options, so one instance can run any number of
//! independent conversions, including in parallel with [`Converter::convert_batch`].

use crate::common::{Error, FileFormat, Result, detect_file_format_from_bytes};
use crate::markdown::{HeadingRecord, MarkdownOptions, assemble_document, render_document};
use crate::ooxml::docx::DocxPackage;
use crate::report::ConversionReport;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Name used for the output when the input path has no file stem.
const FALLBACK_STEM: &str = "document";

/// Options for a whole conversion: rendering plus output side effects.
///
/// # Examples
///
/// ```rust
/// use docmark::ConvertOptions;
///
/// let options: ConvertOptions = serde_saphyr::from_str(
///     "write_report: false\nmarkdown:\n  list_markers: true\n",
/// ).unwrap();
/// assert!(!options.write_report);
/// assert!(options.markdown.list_markers);
/// assert!(options.markdown.include_toc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Markdown rendering options
    pub markdown: MarkdownOptions,
    /// Whether to write `conversion_report.md` next to the output
    pub write_report: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            markdown: MarkdownOptions::default(),
            write_report: true,
        }
    }
}

impl ConvertOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Markdown rendering options.
    #[inline]
    pub fn with_markdown(mut self, markdown: MarkdownOptions) -> Self {
        self.markdown = markdown;
        self
    }

    /// Set whether the conversion report is written.
    #[inline]
    pub fn with_report(mut self, write: bool) -> Self {
        self.write_report = write;
        self
    }

    /// Load options from a YAML file. Missing keys keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_saphyr::from_str(&text).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Where the outputs of one conversion go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Document stem, used as the title
    pub stem: String,
    /// Directory holding the Markdown file, the images and the report
    pub dir: PathBuf,
    /// The Markdown file
    pub markdown_file: PathBuf,
    /// The image directory
    pub images_dir: PathBuf,
}

impl OutputLayout {
    /// Resolve the layout for `input` under the `output` argument.
    ///
    /// An `output` ending in `.md` names the Markdown file itself and its parent
    /// is the output directory. Any other `output` is a root directory and the
    /// document gets `<output>/<stem>/<stem>.md`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docmark::OutputLayout;
    /// use std::path::Path;
    ///
    /// let layout = OutputLayout::resolve(Path::new("in/Plan.docx"), Path::new("out"), "images");
    /// assert_eq!(layout.markdown_file, Path::new("out/Plan/Plan.md"));
    /// assert_eq!(layout.images_dir, Path::new("out/Plan/images"));
    ///
    /// let layout = OutputLayout::resolve(Path::new("in/Plan.docx"), Path::new("docs/plan.md"), "images");
    /// assert_eq!(layout.dir, Path::new("docs"));
    /// ```
    pub fn resolve(input: &Path, output: &Path, images_dir: &str) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_STEM.to_string());

        let is_markdown_file = output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        let (dir, markdown_file) = if is_markdown_file {
            let dir = output.parent().map(Path::to_path_buf).unwrap_or_default();
            (dir, output.to_path_buf())
        } else {
            let dir = output.join(&stem);
            let file = dir.join(format!("{}.md", stem));
            (dir, file)
        };
        let images_dir = dir.join(images_dir);

        Self {
            stem,
            dir,
            markdown_file,
            images_dir,
        }
    }
}

/// Converts Word documents to Markdown files.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// The options this converter runs with.
    #[inline]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert one file and write its outputs under `output`.
    ///
    /// See [`OutputLayout::resolve`] for where the outputs go.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        info!(input = %input.display(), "starting conversion");
        let bytes = fs::read(input)?;
        let format =
            detect_file_format_from_bytes(&bytes).ok_or_else(|| Error::NotOfficeFile(input.to_path_buf()))?;
        info!(%format, "detected file type");

        let layout = OutputLayout::resolve(input, output, &self.options.markdown.images_dir);
        fs::create_dir_all(&layout.dir)?;
        fs::create_dir_all(&layout.images_dir)?;

        let (markdown, headings, images) = match format {
            FileFormat::Docx => self.render_docx(bytes, &layout)?,
            FileFormat::Doc => self.render_doc(&bytes, &layout)?,
        };

        fs::write(&layout.markdown_file, markdown)?;
        info!(path = %layout.markdown_file.display(), "markdown saved");

        let report = ConversionReport {
            source: input.to_path_buf(),
            format,
            output_dir: layout.dir,
            images_dir: layout.images_dir,
            markdown_file: layout.markdown_file,
            headings,
            images,
        };
        if self.options.write_report {
            fs::write(report.report_path(), report.to_string())?;
        }
        info!(
            headings = report.headings.len(),
            images = report.images.len(),
            "conversion completed"
        );
        Ok(report)
    }

    fn render_docx(&self, bytes: Vec<u8>, layout: &OutputLayout) -> Result<(String, HeadingRecord, Vec<String>)> {
        let mut package = DocxPackage::from_bytes(bytes)?;
        let body = package.body()?;
        let rels = package.relationships()?;
        let images = package.extract_images(&layout.images_dir)?;
        info!(count = images.len(), "extracted images");

        let rendered = render_document(&layout.stem, &body, &rels, &images, &self.options.markdown);
        Ok((rendered.markdown, rendered.headings, images.names().to_vec()))
    }

    #[cfg(feature = "ole")]
    fn render_doc(&self, bytes: &[u8], layout: &OutputLayout) -> Result<(String, HeadingRecord, Vec<String>)> {
        info!("image extraction is not supported for DOC files");
        let legacy = crate::ole::extract_legacy_text(bytes);
        let markdown = assemble_document(
            &layout.stem,
            FileFormat::Doc.label(),
            &legacy.headings,
            &legacy.markdown,
            &self.options.markdown,
        );
        Ok((markdown, legacy.headings, Vec::new()))
    }

    #[cfg(not(feature = "ole"))]
    fn render_doc(&self, _bytes: &[u8], _layout: &OutputLayout) -> Result<(String, HeadingRecord, Vec<String>)> {
        Err(Error::FeatureDisabled("ole".to_string()))
    }

    /// Convert several files in parallel, each into its own output directory
    /// under `output`. Results are returned in input order.
    ///
    /// Fails with [`Error::OutputConflict`] before converting anything when two
    /// inputs would write into the same output directory, as happens with a
    /// `.md` output and several inputs, or with inputs sharing a file stem.
    pub fn convert_batch(&self, inputs: &[PathBuf], output: &Path) -> Result<Vec<Result<ConversionReport>>> {
        self.check_distinct_outputs(inputs, output)?;
        Ok(inputs
            .par_iter()
            .map(|input| {
                let result = self.convert_file(input, output);
                if let Err(e) = &result {
                    warn!(input = %input.display(), error = %e, "conversion failed");
                }
                result
            })
            .collect())
    }

    fn check_distinct_outputs(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        let mut seen = HashSet::with_capacity(inputs.len());
        for input in inputs {
            let layout = OutputLayout::resolve(input, output, &self.options.markdown.images_dir);
            if !seen.insert(layout.dir.clone()) {
                return Err(Error::OutputConflict(layout.dir));
            }
        }
        Ok(())
    }
}

/// Convert one file with default options.
///
/// # Examples
///
/// ```rust,no_run
/// let report = docmark::convert_file("minutes.docx".as_ref(), "out".as_ref())?;
/// println!("wrote {}", report.markdown_file.display());
/// # Ok::<(), docmark::Error>(())
/// ```
pub fn convert_file(input: &Path, output: &Path) -> Result<ConversionReport> {
    Converter::default().convert_file(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_for_directory_output() {
        let layout = OutputLayout::resolve(Path::new("a/b/report.final.docx"), Path::new("out"), "images");
        assert_eq!(layout.stem, "report.final");
        assert_eq!(layout.dir, PathBuf::from("out/report.final"));
        assert_eq!(layout.markdown_file, PathBuf::from("out/report.final/report.final.md"));
    }

    #[test]
    fn test_layout_for_markdown_file_output() {
        let layout = OutputLayout::resolve(Path::new("x.docx"), Path::new("notes/Readme.MD"), "assets");
        assert_eq!(layout.dir, PathBuf::from("notes"));
        assert_eq!(layout.markdown_file, PathBuf::from("notes/Readme.MD"));
        assert_eq!(layout.images_dir, PathBuf::from("notes/assets"));
        assert_eq!(layout.stem, "x");
    }

    #[test]
    fn test_unknown_format_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        fs::write(&input, "just some text").unwrap();
        let err = convert_file(&input, &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, Error::NotOfficeFile(ref p) if p == &input));
    }

    #[test]
    fn test_batch_rejects_shared_output_directory() {
        let converter = Converter::default();
        let inputs = [PathBuf::from("a.docx"), PathBuf::from("b.docx")];
        let err = converter.convert_batch(&inputs, Path::new("out/one.md")).unwrap_err();
        assert!(matches!(err, Error::OutputConflict(ref dir) if dir == Path::new("out")));

        let same_stem = [PathBuf::from("a/r.docx"), PathBuf::from("b/r.docx")];
        let err = converter.convert_batch(&same_stem, Path::new("out")).unwrap_err();
        assert!(matches!(err, Error::OutputConflict(ref dir) if dir == Path::new("out/r")));
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(&dir.path().join("absent.docx"), dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_yaml_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docmark.yaml");
        fs::write(&path, "markdown:\n  images_dir: media\n  heading_length_threshold: 40\n").unwrap();
        let options = ConvertOptions::from_yaml_file(&path).unwrap();
        assert_eq!(options.markdown.images_dir, "media");
        assert_eq!(options.markdown.heading_length_threshold, 40);
        assert!(options.write_report);

        fs::write(&path, "markdown: [not, a, map]\n").unwrap();
        assert!(matches!(ConvertOptions::from_yaml_file(&path), Err(Error::Config(_))));
    }
}
