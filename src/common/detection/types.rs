//! File format type enumeration.

/// Word document container formats that can be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Microsoft Word Document (OLE2 format, .doc)
    Doc,
    /// Microsoft Word Document (OOXML format, .docx)
    Docx,
}

impl FileFormat {
    /// Upper-case label used in the document banner and the report.
    pub fn label(self) -> &'static str {
        match self {
            FileFormat::Doc => "DOC",
            FileFormat::Docx => "DOCX",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Doc => "doc",
            FileFormat::Docx => "docx",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
