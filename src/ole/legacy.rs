//! Best-effort text extraction from legacy binary Word documents.
//!
//! The file is scanned for runs of printable characters, both as single-byte text
//! and as UTF-16LE text, and the runs are emitted in file order. Short runs that
//! look like titles are marked as level-2 headings. Formatting, tables and images
//! are lost.

use crate::common::error::Result;
use crate::markdown::HeadingRecord;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::path::Path;
use tracing::{debug, info};

/// Output used when no readable text was found.
pub const NO_TEXT_MESSAGE: &str = "Could not extract readable text from this .doc file.";

/// Runs shorter than this many characters after whitespace collapsing are dropped.
const MIN_LINE_CHARS: usize = 16;

/// Kept lines shorter than this may become headings.
const HEADING_MAX_CHARS: usize = 60;

/// Kept lines with more words than this never become headings.
const HEADING_MAX_WORDS: usize = 8;

/// At least ten printable ASCII characters.
static NARROW_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?-u)[A-Za-z0-9\s.,;:!?\-()\[\]"']{10,}"#).expect("narrow text regex must compile")
});

/// At least ten printable ASCII characters encoded as UTF-16LE.
static WIDE_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?-u)(?:[A-Za-z0-9\s.,;:!?\-()\[\]"']\x00){10,}"#).expect("wide text regex must compile")
});

/// Text scraped from a legacy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyText {
    /// Pre-rendered Markdown, lines separated by blank lines
    pub markdown: String,
    /// Headings marked by the title heuristic, all at level 2
    pub headings: HeadingRecord,
}

/// Read a legacy document from disk and scrape its text.
pub fn extract_legacy_file<P: AsRef<Path>>(path: P) -> Result<LegacyText> {
    let bytes = std::fs::read(path.as_ref())?;
    let text = extract_legacy_text(&bytes);
    info!(
        path = %path.as_ref().display(),
        headings = text.headings.len(),
        "scraped legacy document text"
    );
    Ok(text)
}

/// Scrape readable text out of the raw bytes of a legacy document.
///
/// # Examples
///
/// ```rust
/// use docmark::ole::extract_legacy_text;
///
/// let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0x00, 0x01];
/// bytes.extend_from_slice(b"Quarterly Sales Review");
/// bytes.push(0x00);
/// bytes.extend_from_slice(b"Revenue grew in every region this quarter.");
///
/// let text = extract_legacy_text(&bytes);
/// assert_eq!(
///     text.markdown,
///     "## Quarterly Sales Review\n\nRevenue grew in every region this quarter."
/// );
/// assert_eq!(text.headings.len(), 1);
/// ```
pub fn extract_legacy_text(bytes: &[u8]) -> LegacyText {
    let mut runs: Vec<(usize, String)> = NARROW_TEXT
        .find_iter(bytes)
        .map(|m| (m.start(), String::from_utf8_lossy(m.as_bytes()).into_owned()))
        .chain(WIDE_TEXT.find_iter(bytes).map(|m| {
            let text: String = m.as_bytes().iter().step_by(2).map(|&b| char::from(b)).collect();
            (m.start(), text)
        }))
        .collect();
    runs.sort_by_key(|(offset, _)| *offset);

    let mut headings = HeadingRecord::new();
    let mut lines = Vec::new();
    for (_, run) in runs {
        let line = collapse_whitespace(&run);
        if !is_readable(&line) {
            continue;
        }
        if looks_like_heading(&line) {
            lines.push(format!("## {}", line));
            headings.push(2, line);
        } else {
            lines.push(line);
        }
    }
    debug!(lines = lines.len(), "kept readable runs");

    let markdown = if lines.is_empty() {
        NO_TEXT_MESSAGE.to_string()
    } else {
        lines.join("\n\n")
    };
    LegacyText { markdown, headings }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Long enough and not only numbers and separators.
fn is_readable(line: &str) -> bool {
    line.chars().count() >= MIN_LINE_CHARS
        && !line
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '.' || c == '-')
}

fn looks_like_heading(line: &str) -> bool {
    if line.chars().count() >= HEADING_MAX_CHARS || line.ends_with(['.', '!', '?', ',']) {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    words.len() <= HEADING_MAX_WORDS
        && words
            .iter()
            .any(|word| word.chars().next().is_some_and(char::is_uppercase))
}
