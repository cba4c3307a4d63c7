/// Constant values related to the Open Packaging Convention.
///
/// This module contains the part names, relationship types and target prefixes
/// a WordprocessingML package is navigated by.

/// Well-known part names inside a .docx package
pub mod part_name {
    /// Main document part
    pub const DOCUMENT: &str = "word/document.xml";
    /// Relationship manifest of the main document part
    pub const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";
    /// Folder holding embedded media, as a package path prefix
    pub const MEDIA_FOLDER: &str = "word/media/";
}

/// Relationship type URIs used in OPC packages
pub mod relationship_type {
    // Images and media
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

    // External links
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

    /// Suffix shared by the transitional and strict hyperlink relationship types
    pub const HYPERLINK_SUFFIX: &str = "/hyperlink";
}

/// Relationship targets, relative to the `word/` folder
pub mod target {
    /// Prefix of relationship targets pointing into the media folder
    pub const MEDIA_PREFIX: &str = "media/";
}

/// Open XML relationship target modes
pub mod target_mode {
    /// External relationship target mode (e.g., hyperlinks to external URLs)
    pub const EXTERNAL: &str = "External";
}
