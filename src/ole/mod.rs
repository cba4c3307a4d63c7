/// Legacy OLE2 compound documents.
///
/// Binary Word documents (.doc) are not parsed structurally. The
/// [`legacy`] extractor scrapes readable text out of the raw file and marks
/// likely headings, which is enough for a best-effort Markdown rendering.

/// Degraded text extraction for legacy Word documents
pub mod legacy;

pub use legacy::{LegacyText, NO_TEXT_MESSAGE, extract_legacy_file, extract_legacy_text};
