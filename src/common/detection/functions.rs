//! Core file format detection functions.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::types::FileFormat;
use super::utils::{OLE2_SIGNATURE, SIGNATURE_LEN, ZIP_EMPTY_SIGNATURE, ZIP_SIGNATURE, signature_matches};

/// Detect file format from a file path.
///
/// Only the first few bytes of the file are read.
///
/// # Returns
///
/// * `Some(FileFormat)` if a supported container is detected
/// * `None` if the format is not recognized or the file cannot be read
///
/// # Examples
///
/// ```rust,no_run
/// use docmark::common::detection::detect_file_format;
///
/// if let Some(format) = detect_file_format("report.docx") {
///     println!("Detected format: {:?}", format);
/// }
/// ```
pub fn detect_file_format<P: AsRef<Path>>(path: P) -> Option<FileFormat> {
    let mut file = File::open(path).ok()?;
    let mut header = [0u8; SIGNATURE_LEN];
    let mut filled = 0;
    while filled < header.len() {
        match file.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(_) => return None,
        }
    }
    detect_file_format_from_bytes(&header[..filled])
}

/// Detect file format from a byte slice.
///
/// A ZIP signature is taken to mean a WordprocessingML package; whether the
/// package actually contains `word/document.xml` is checked when it is opened.
pub fn detect_file_format_from_bytes(bytes: &[u8]) -> Option<FileFormat> {
    if signature_matches(bytes, ZIP_SIGNATURE) || signature_matches(bytes, ZIP_EMPTY_SIGNATURE) {
        return Some(FileFormat::Docx);
    }
    if signature_matches(bytes, OLE2_SIGNATURE) {
        return Some(FileFormat::Doc);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_zip_package() {
        assert_eq!(
            detect_file_format_from_bytes(b"PK\x03\x04\x14\x00\x06\x00"),
            Some(FileFormat::Docx)
        );
    }

    #[test]
    fn test_detect_ole_document() {
        let mut bytes = OLE2_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0u8; 504]);
        assert_eq!(detect_file_format_from_bytes(&bytes), Some(FileFormat::Doc));
    }

    #[test]
    fn test_reject_short_and_unknown_input() {
        assert_eq!(detect_file_format_from_bytes(b"PK"), None);
        assert_eq!(detect_file_format_from_bytes(b"%PDF-1.7"), None);
        // Truncated OLE header is not enough
        assert_eq!(detect_file_format_from_bytes(&OLE2_SIGNATURE[..4]), None);
    }
}
