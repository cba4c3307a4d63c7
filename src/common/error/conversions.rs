//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::ooxml::error::OoxmlError;

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::Xml(s) => Error::XmlError(s),
            OoxmlError::Zip(s) => Error::ZipError(s),
            OoxmlError::PartNotFound(s) => Error::ComponentNotFound(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ooxml_errors_map_to_unified_variants() {
        let err: Error = OoxmlError::PartNotFound("word/document.xml".to_string()).into();
        assert!(matches!(err, Error::ComponentNotFound(ref s) if s == "word/document.xml"));

        let err: Error = OoxmlError::Xml("unexpected end".to_string()).into();
        assert_eq!(err.to_string(), "XML error: unexpected end");
    }
}
