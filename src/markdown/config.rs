/// Configuration types for Markdown conversion.
///
/// This module defines the options that customize how a document tree is
/// rendered: the document banner, the table of contents, the image folder and
/// the thresholds used by the heading heuristics.
use serde::{Deserialize, Serialize};

/// Default folder name, relative to the Markdown file, that image links point into.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Default length below which a fully bold paragraph becomes a level-2 heading.
pub const DEFAULT_HEADING_LENGTH_THRESHOLD: usize = 60;

/// Configuration options for Markdown conversion.
///
/// Every field has a default, so a partial YAML document (or an empty one)
/// deserializes into a complete set of options.
///
/// # Examples
///
/// ```rust
/// use docmark::markdown::MarkdownOptions;
///
/// // Create with defaults
/// let options = MarkdownOptions::default();
/// assert!(options.include_toc);
///
/// // Or customize
/// let options = MarkdownOptions::new()
///     .with_toc(false)
///     .with_images_dir("assets")
///     .with_list_markers(true);
/// assert_eq!(options.images_dir, "assets");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Whether to insert a table of contents when headings were detected
    pub include_toc: bool,
    /// Whether to start the output with the document title and type banner
    pub include_banner: bool,
    /// Folder name used in image links
    pub images_dir: String,
    /// Fully bold paragraphs shorter than this many characters become level-2
    /// headings; longer ones level 3
    pub heading_length_threshold: usize,
    /// Whether list items get a `- ` marker indented by their numbering level
    pub list_markers: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            include_toc: true,
            include_banner: true,
            images_dir: DEFAULT_IMAGES_DIR.to_string(),
            heading_length_threshold: DEFAULT_HEADING_LENGTH_THRESHOLD,
            list_markers: false,
        }
    }
}

impl MarkdownOptions {
    /// Create a new `MarkdownOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to insert a table of contents.
    ///
    /// The table is only emitted when at least one heading was detected.
    #[inline]
    pub fn with_toc(mut self, include: bool) -> Self {
        self.include_toc = include;
        self
    }

    /// Set whether to emit the `# name` title and the document type line.
    #[inline]
    pub fn with_banner(mut self, include: bool) -> Self {
        self.include_banner = include;
        self
    }

    /// Set the folder name image links point into.
    #[inline]
    pub fn with_images_dir(mut self, dir: impl Into<String>) -> Self {
        self.images_dir = dir.into();
        self
    }

    /// Set the length threshold between level-2 and level-3 bold headings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docmark::markdown::MarkdownOptions;
    ///
    /// let options = MarkdownOptions::new().with_heading_length_threshold(40);
    /// assert_eq!(options.heading_length_threshold, 40);
    /// ```
    #[inline]
    pub fn with_heading_length_threshold(mut self, threshold: usize) -> Self {
        self.heading_length_threshold = threshold;
        self
    }

    /// Set whether list items are prefixed with indented `- ` markers.
    #[inline]
    pub fn with_list_markers(mut self, enabled: bool) -> Self {
        self.list_markers = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_options_builder() {
        let options = MarkdownOptions::new()
            .with_toc(false)
            .with_banner(false)
            .with_images_dir("media")
            .with_heading_length_threshold(30)
            .with_list_markers(true);

        assert!(!options.include_toc);
        assert!(!options.include_banner);
        assert_eq!(options.images_dir, "media");
        assert_eq!(options.heading_length_threshold, 30);
        assert!(options.list_markers);
    }

    #[test]
    fn test_markdown_options_default() {
        let options = MarkdownOptions::default();
        assert!(options.include_toc);
        assert!(options.include_banner);
        assert_eq!(options.images_dir, "images");
        assert_eq!(options.heading_length_threshold, 60);
        assert!(!options.list_markers);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let options: MarkdownOptions = serde_saphyr::from_str("list_markers: true\n").unwrap();
        assert!(options.list_markers);
        assert!(options.include_toc);
        assert_eq!(options.images_dir, "images");
    }
}
