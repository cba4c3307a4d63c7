//! Package implementation for Word documents.
use super::body::Body;
use super::image::{ImageRegistry, is_image_entry, output_file_name};
use super::parser::parse_body;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::part_name;
use crate::ooxml::opc::rel::RelationshipTables;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

/// Upper bound on the buffer reserved up front for one part. The size an entry
/// declares is untrusted; larger parts still read fully, growing as they go.
const MAX_PREALLOCATION: u64 = 16 * 1024 * 1024;

#[inline]
fn preallocation(declared_size: u64) -> usize {
    declared_size.min(MAX_PREALLOCATION) as usize
}

/// A Word (.docx) package read fully into memory.
///
/// This is the entry point for everything the converter needs from a `.docx`
/// file: the parsed body, the relationship tables and the media entries.
///
/// # Examples
///
/// ```rust,no_run
/// use docmark::ooxml::docx::DocxPackage;
///
/// let mut pkg = DocxPackage::open("report.docx")?;
/// let body = pkg.body()?;
/// let rels = pkg.relationships()?;
/// println!("{} blocks, {} links", body.blocks().len(), rels.hyperlink_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DocxPackage {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl DocxPackage {
    /// Open a .docx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Create a package from the raw bytes of a .docx file.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(bytes))?;
        debug!(entries = archive.len(), "opened package archive");
        Ok(Self { archive })
    }

    /// Read a part by its name inside the archive.
    ///
    /// Returns `Ok(None)` when the archive has no entry with that name.
    pub fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut data = Vec::with_capacity(preallocation(file.size()));
        file.read_to_end(&mut data)?;
        Ok(Some(data))
    }

    /// The main document part (`word/document.xml`).
    pub fn document_xml(&mut self) -> Result<Vec<u8>> {
        self.read_part(part_name::DOCUMENT)?
            .ok_or_else(|| OoxmlError::PartNotFound(part_name::DOCUMENT.to_string()))
    }

    /// Parse the main document part into a body tree.
    pub fn body(&mut self) -> Result<Body> {
        let xml = self.document_xml()?;
        parse_body(&xml)
    }

    /// Resolve the relationship manifest of the main document part.
    ///
    /// A missing or malformed manifest yields empty tables rather than an error;
    /// only a failure to read the archive itself is reported.
    pub fn relationships(&mut self) -> Result<RelationshipTables> {
        let manifest = self.read_part(part_name::DOCUMENT_RELS)?;
        Ok(RelationshipTables::from_manifest(manifest.as_deref()))
    }

    /// Names of the supported image entries under `word/media/`, in archive order.
    pub fn media_entries(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|index| self.archive.name_for_index(index))
            .filter(|name| name.starts_with(part_name::MEDIA_FOLDER) && is_image_entry(name))
            .map(str::to_string)
            .collect()
    }

    /// Copy every supported media entry into `dir` under a sequence-numbered name.
    ///
    /// An entry that cannot be read or written is logged and skipped without using
    /// up a sequence number; only failing to create `dir` is an error.
    pub fn extract_images(&mut self, dir: &Path) -> Result<ImageRegistry> {
        fs::create_dir_all(dir)?;
        let mut registry = ImageRegistry::new();

        for entry in self.media_entries() {
            let name = output_file_name(registry.len() + 1, &entry);
            match self.copy_entry(&entry, &dir.join(&name)) {
                Ok(()) => {
                    info!(image = %name, "extracted image");
                    registry.push(name);
                },
                Err(e) => warn!(entry = %entry, error = %e, "failed to extract image"),
            }
        }

        Ok(registry)
    }

    fn copy_entry(&mut self, entry: &str, dest: &Path) -> Result<()> {
        let data = self
            .read_part(entry)?
            .ok_or_else(|| OoxmlError::PartNotFound(entry.to_string()))?;
        fs::write(dest, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn package(entries: &[(&str, &[u8])]) -> DocxPackage {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        let bytes = writer.finish().unwrap().into_inner();
        DocxPackage::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_media_entries_filter_and_order() {
        let pkg = package(&[
            ("word/document.xml", b"<w:document/>"),
            ("word/media/image2.png", b"png"),
            ("word/media/image1.emf", b"emf"),
            ("word/media/photo.JPG", b"jpg"),
            ("media/outside.png", b"png"),
        ]);
        assert_eq!(pkg.media_entries(), vec!["word/media/image2.png", "word/media/photo.JPG"]);
    }

    #[test]
    fn test_extract_images_numbers_in_order() {
        let mut pkg = package(&[("word/media/b.png", b"B"), ("word/media/a.gif", b"A")]);
        let dir = tempfile::tempdir().unwrap();
        let registry = pkg.extract_images(dir.path()).unwrap();
        assert_eq!(registry.names(), &["image_001_b.png", "image_002_a.gif"]);
        assert_eq!(fs::read(dir.path().join("image_002_a.gif")).unwrap(), b"A");
    }

    #[test]
    fn test_missing_document_part() {
        let mut pkg = package(&[("word/styles.xml", b"<w:styles/>")]);
        assert!(matches!(pkg.document_xml(), Err(OoxmlError::PartNotFound(_))));
        assert_eq!(pkg.read_part("nope.xml").unwrap(), None);
    }

    #[test]
    fn test_missing_manifest_is_not_an_error() {
        let mut pkg = package(&[("word/document.xml", b"<w:document/>")]);
        let rels = pkg.relationships().unwrap();
        assert_eq!(rels.hyperlink_count(), 0);
    }

    #[test]
    fn test_declared_size_does_not_drive_allocation() {
        assert_eq!(preallocation(512), 512);
        assert_eq!(preallocation(u64::MAX), MAX_PREALLOCATION as usize);
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            DocxPackage::from_bytes(b"plain text".to_vec()),
            Err(OoxmlError::Zip(_))
        ));
    }
}
