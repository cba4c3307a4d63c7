//! Extracted-image registry for DOCX packages.
//!
//! Images live in the package under `word/media/` and are referenced from the body
//! through relationship ids. During conversion every supported media entry is
//! copied out under a new, sequence-numbered name; the registry keeps those names
//! in package order so the Markdown renderer can map a media path back to the file
//! it was written to.

use std::path::Path;

/// File extensions (lowercase, without the dot) of media entries that are extracted.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "svg"];

/// Whether a package entry name has one of the [`IMAGE_EXTENSIONS`], compared
/// case-insensitively.
pub fn is_image_entry(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Output file name for the `counter`-th extracted image.
///
/// The original stem and extension are kept after a three-digit, zero-padded
/// sequence number: `image1.png` as the first image becomes `image_001_image1.png`.
///
/// # Examples
///
/// ```rust
/// use docmark::ooxml::docx::output_file_name;
///
/// assert_eq!(output_file_name(1, "word/media/image1.png"), "image_001_image1.png");
/// assert_eq!(output_file_name(12, "chart.JPEG"), "image_012_chart.JPEG");
/// ```
pub fn output_file_name(counter: usize, original: &str) -> String {
    let base = original.rsplit('/').next().unwrap_or(original);
    let (stem, ext) = match base.rfind('.') {
        Some(dot) if dot > 0 => base.split_at(dot),
        _ => (base, ""),
    };
    format!("image_{:03}_{}{}", counter, stem, ext)
}

/// Ordered output file names of the images extracted from one document.
///
/// Names are unique within a conversion and appear in the order the media entries
/// were found in the package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRegistry {
    names: Vec<String>,
}

impl ImageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-known output names, in order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn push(&mut self, name: String) {
        self.names.push(name);
    }

    /// Output names in extraction order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of extracted images.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no image was extracted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_entry() {
        assert!(is_image_entry("word/media/image1.png"));
        assert!(is_image_entry("word/media/Photo.JPG"));
        assert!(is_image_entry("word/media/diagram.svg"));
        assert!(!is_image_entry("word/media/image2.emf"));
        assert!(!is_image_entry("word/media/noext"));
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(1, "image1.png"), "image_001_image1.png");
        assert_eq!(output_file_name(999, "word/media/a.b.gif"), "image_999_a.b.gif");
        assert_eq!(output_file_name(1000, "x.png"), "image_1000_x.png");
    }

    #[test]
    fn test_registry_keeps_order() {
        let registry = ImageRegistry::from_names(["image_001_b.png", "image_002_a.png"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names()[0], "image_001_b.png");
        assert!(ImageRegistry::new().is_empty());
    }
}
