//! Conversion report.
//!
//! A short Markdown summary written next to the converted document: where the
//! output went, how many headings and images were found, and the heading outline.

use crate::common::FileFormat;
use crate::markdown::HeadingRecord;
use std::fmt;
use std::path::PathBuf;

/// File name of the report inside the output directory.
pub const REPORT_FILE_NAME: &str = "conversion_report.md";

/// Summary of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Input document
    pub source: PathBuf,
    /// Detected container format
    pub format: FileFormat,
    /// Directory holding the Markdown file, images and report
    pub output_dir: PathBuf,
    /// Directory the images were extracted into
    pub images_dir: PathBuf,
    /// The written Markdown file
    pub markdown_file: PathBuf,
    /// Headings detected in the document
    pub headings: HeadingRecord,
    /// Output names of the extracted images, in order
    pub images: Vec<String>,
}

impl ConversionReport {
    /// Path the report is written to.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Conversion Report")?;
        writeln!(f)?;
        writeln!(f, "## Document Information")?;
        writeln!(f, "- **Source File**: {}", self.source.display())?;
        writeln!(f, "- **File Type**: {}", self.format.label())?;
        writeln!(f, "- **Output Directory**: {}", self.output_dir.display())?;
        writeln!(f, "- **Images Directory**: {}", self.images_dir.display())?;
        writeln!(f)?;
        writeln!(f, "## Conversion Results")?;
        writeln!(f, "- **Total Headings**: {}", self.headings.len())?;
        writeln!(f, "- **Images Extracted**: {}", self.images.len())?;
        writeln!(f, "- **Output Created**: ✅")?;
        writeln!(f)?;

        writeln!(f, "## Extracted Images")?;
        if self.images.is_empty() {
            writeln!(f, "No images found or extracted.")?;
        }
        for (index, image) in self.images.iter().enumerate() {
            writeln!(f, "{}. {}", index + 1, image)?;
        }

        writeln!(f)?;
        writeln!(f, "## Document Structure")?;
        if self.headings.is_empty() {
            writeln!(f, "No headings detected.")?;
        }
        for heading in self.headings.iter() {
            let indent = "  ".repeat(usize::from(heading.level - 1));
            writeln!(f, "{}- {}", indent, heading.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(images: Vec<String>, headings: HeadingRecord) -> ConversionReport {
        ConversionReport {
            source: PathBuf::from("in/manual.docx"),
            format: FileFormat::Docx,
            output_dir: PathBuf::from("out/manual"),
            images_dir: PathBuf::from("out/manual/images"),
            markdown_file: PathBuf::from("out/manual/manual.md"),
            headings,
            images,
        }
    }

    #[test]
    fn test_report_lists_images_and_outline() {
        let mut headings = HeadingRecord::new();
        headings.push(1, "Intro");
        headings.push(2, "Details");
        let text = report(vec!["image_001_a.png".to_string()], headings).to_string();

        assert!(text.starts_with("# Conversion Report\n\n## Document Information\n"));
        assert!(text.contains("- **File Type**: DOCX\n"));
        assert!(text.contains("- **Total Headings**: 2\n"));
        assert!(text.contains("## Extracted Images\n1. image_001_a.png\n"));
        assert!(text.ends_with("## Document Structure\n- Intro\n  - Details\n"));
    }

    #[test]
    fn test_empty_report_sections() {
        let text = report(Vec::new(), HeadingRecord::new()).to_string();
        assert!(text.contains("No images found or extracted.\n"));
        assert!(text.ends_with("No headings detected.\n"));
        assert_eq!(
            report(Vec::new(), HeadingRecord::new()).report_path(),
            PathBuf::from("out/manual/conversion_report.md")
        );
    }
}
