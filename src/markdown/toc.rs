//! Heading record and table of contents.
//!
//! Every heading decision made while rendering a document is appended to a
//! [`HeadingRecord`]. After the body has been rendered the record becomes a
//! bullet list of links, one per heading, indented by heading level.

use std::fmt::Write as FmtWrite;

/// Title line of the generated table of contents.
pub const TOC_TITLE: &str = "## Table of Contents";

/// A heading detected in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading level, 1 to 6
    pub level: u8,
    /// Heading text as rendered after the `#` markers
    pub text: String,
}

/// Ordered log of the headings detected in one document.
///
/// Levels are kept exactly as decided: they need not increase monotonically and
/// may skip values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingRecord {
    headings: Vec<Heading>,
}

impl HeadingRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a heading. The level is clamped into `1..=6`.
    pub fn push(&mut self, level: u8, text: impl Into<String>) {
        self.headings.push(Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        });
    }

    /// Headings in the order they were recorded.
    #[inline]
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Heading> {
        self.headings.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }
}

/// Link anchor for a heading.
///
/// The text is lowercased, spaces become `-`, and every character that is
/// neither a word character nor `-` is removed.
///
/// # Examples
///
/// ```rust
/// use docmark::markdown::anchor;
///
/// assert_eq!(anchor("Getting Started, v1.2!"), "getting-started-v12");
/// ```
pub fn anchor(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c == '-' || c == '_' || c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

/// Render the table of contents for a record, or an empty string when the record
/// is empty.
pub fn render_toc(record: &HeadingRecord) -> String {
    if record.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(TOC_TITLE.len() + record.len() * 32);
    out.push_str(TOC_TITLE);
    out.push('\n');
    for heading in record.iter() {
        out.push('\n');
        let indent = "  ".repeat(usize::from(heading.level - 1));
        let _ = write!(out, "{}- [{}](#{})", indent, heading.text, anchor(&heading.text));
    }
    out.push_str("\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor() {
        assert_eq!(anchor("Overview"), "overview");
        assert_eq!(anchor("1. Scope, Goals"), "1-scope-goals");
        assert_eq!(anchor("Q&A (draft)"), "qa-draft");
        assert_eq!(anchor("snake_case-name"), "snake_case-name");
        assert_eq!(anchor("Überblick"), "überblick");
    }

    #[test]
    fn test_render_toc_indents_by_level() {
        let mut record = HeadingRecord::new();
        record.push(1, "Intro");
        record.push(3, "Deep Dive");
        record.push(2, "Setup");

        assert_eq!(
            render_toc(&record),
            "## Table of Contents\n\n- [Intro](#intro)\n    - [Deep Dive](#deep-dive)\n  - [Setup](#setup)\n\n"
        );
    }

    #[test]
    fn test_empty_record_has_no_toc() {
        assert_eq!(render_toc(&HeadingRecord::new()), "");
    }

    #[test]
    fn test_levels_are_clamped() {
        let mut record = HeadingRecord::new();
        record.push(0, "zero");
        record.push(9, "nine");
        let levels: Vec<u8> = record.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![1, 6]);
    }
}
