//! Utility functions and constants for file format detection.

// Magic number signatures
pub const OLE2_SIGNATURE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
pub const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
/// End-of-central-directory record; the only record in an empty archive.
pub const ZIP_EMPTY_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x05, 0x06];

/// Number of leading bytes needed to recognize any supported signature.
pub const SIGNATURE_LEN: usize = 8;

/// Check whether `bytes` starts with `signature`.
#[inline]
pub fn signature_matches(bytes: &[u8], signature: &[u8]) -> bool {
    bytes.len() >= signature.len() && &bytes[..signature.len()] == signature
}
