//! Relationship-related objects for OPC packages.
//!
//! This module reads the relationship manifest of the main document part and
//! derives the two lookup tables the Markdown renderer resolves references with:
//! hyperlink ids to URLs and image ids to media paths.
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{relationship_type, target, target_mode};
use crate::ooxml::xml::attr_value;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A single relationship from the document part to a target.
///
/// Represents one `<Relationship>` element of a `.rels` part, identified by its
/// rId (relationship ID).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part path relative to `word/` or an external URL
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    /// Create a new relationship.
    pub fn new(r_id: String, reltype: String, target_ref: String, is_external: bool) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            is_external,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Whether this relationship points at a hyperlink target.
    #[inline]
    pub fn is_hyperlink(&self) -> bool {
        self.reltype.ends_with(relationship_type::HYPERLINK_SUFFIX)
    }

    /// Whether this relationship points into the package media folder.
    #[inline]
    pub fn is_media(&self) -> bool {
        self.target_ref.starts_with(target::MEDIA_PREFIX)
    }
}

/// Collection of relationships parsed from one `.rels` part, in manifest order.
#[derive(Debug, Default, Clone)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Parse a relationship manifest.
    ///
    /// Entries lacking an `Id` or `Target` are skipped.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut rels = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                    let (Some(r_id), Some(target_ref)) =
                        (attr_value(&e, b"Id"), attr_value(&e, b"Target"))
                    else {
                        continue;
                    };
                    let reltype = attr_value(&e, b"Type").unwrap_or_default();
                    let is_external = attr_value(&e, b"TargetMode")
                        .is_some_and(|mode| mode == target_mode::EXTERNAL);
                    rels.push(Relationship::new(r_id, reltype, target_ref, is_external));
                },
                Event::Eof => break,
                _ => {},
            }
        }

        Ok(Self { rels })
    }

    /// Get a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id() == r_id)
    }

    /// Get an iterator over all relationships.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}

/// Lookup tables resolved from the document relationship manifest.
///
/// Built once per document before the body is traversed and only read while
/// rendering. A missing or malformed manifest yields empty tables: hyperlinks
/// then render as plain text and images are dropped.
#[derive(Debug, Default, Clone)]
pub struct RelationshipTables {
    /// Hyperlink relationship id → URL
    hyperlinks: HashMap<String, String>,
    /// Image relationship id → media path relative to `word/`
    images: HashMap<String, String>,
}

impl RelationshipTables {
    /// Create empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tables from parsed relationships.
    pub fn from_relationships(rels: &Relationships) -> Self {
        let mut tables = Self::new();
        for rel in rels.iter() {
            if rel.is_hyperlink() {
                tables
                    .hyperlinks
                    .insert(rel.r_id().to_string(), rel.target_ref().to_string());
            } else if rel.is_media() {
                tables
                    .images
                    .insert(rel.r_id().to_string(), rel.target_ref().to_string());
            }
        }
        debug!(
            hyperlinks = tables.hyperlinks.len(),
            images = tables.images.len(),
            "resolved document relationships"
        );
        tables
    }

    /// Build the tables from the raw manifest, degrading to empty tables when
    /// the manifest is missing or cannot be parsed.
    pub fn from_manifest(xml: Option<&[u8]>) -> Self {
        let Some(xml) = xml else {
            warn!("document relationship manifest is missing; links and images will be dropped");
            return Self::new();
        };
        match Relationships::from_xml(xml) {
            Ok(rels) => Self::from_relationships(&rels),
            Err(e) => {
                warn!(error = %e, "malformed relationship manifest; links and images will be dropped");
                Self::new()
            },
        }
    }

    /// Register a hyperlink target.
    pub fn insert_hyperlink(&mut self, r_id: impl Into<String>, url: impl Into<String>) {
        self.hyperlinks.insert(r_id.into(), url.into());
    }

    /// Register an image target.
    pub fn insert_image(&mut self, r_id: impl Into<String>, media_path: impl Into<String>) {
        self.images.insert(r_id.into(), media_path.into());
    }

    /// Resolve a hyperlink relationship id to its URL.
    #[inline]
    pub fn hyperlink(&self, r_id: &str) -> Option<&str> {
        self.hyperlinks.get(r_id).map(String::as_str)
    }

    /// Resolve an image relationship id to its media path.
    #[inline]
    pub fn image(&self, r_id: &str) -> Option<&str> {
        self.images.get(r_id).map(String::as_str)
    }

    /// Number of hyperlink mappings.
    #[inline]
    pub fn hyperlink_count(&self) -> usize {
        self.hyperlinks.len()
    }

    /// Number of image mappings.
    #[inline]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
  <Relationship Id="rId4" Type="http://purl.oclc.org/ooxml/officeDocument/relationships/hyperlink" Target="https://strict.example.org" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_manifest() {
        let rels = Relationships::from_xml(MANIFEST.as_bytes()).unwrap();
        assert_eq!(rels.len(), 4);

        let link = rels.get("rId3").unwrap();
        assert!(link.is_external());
        assert!(link.is_hyperlink());
        assert_eq!(link.target_ref(), "https://example.com/?a=1&b=2");
        assert_eq!(link.reltype(), relationship_type::HYPERLINK);

        let image = rels.get("rId2").unwrap();
        assert!(image.is_media());
        assert!(!image.is_external());
    }

    #[test]
    fn test_tables_split_by_kind() {
        let tables = RelationshipTables::from_manifest(Some(MANIFEST.as_bytes()));
        assert_eq!(tables.hyperlink_count(), 2);
        assert_eq!(tables.image_count(), 1);
        assert_eq!(tables.hyperlink("rId4"), Some("https://strict.example.org"));
        assert_eq!(tables.image("rId2"), Some("media/image1.png"));
        assert_eq!(tables.hyperlink("rId1"), None);
        assert_eq!(tables.image("rId1"), None);
    }

    #[test]
    fn test_missing_manifest_degrades_to_empty() {
        let tables = RelationshipTables::from_manifest(None);
        assert_eq!(tables.hyperlink_count(), 0);
        assert_eq!(tables.image_count(), 0);
    }

    #[test]
    fn test_malformed_manifest_is_xml_error() {
        let err = Relationships::from_xml(b"<Relationships><Relationship Id=\"rId1\"").unwrap_err();
        assert!(matches!(err, crate::ooxml::OoxmlError::Xml(_)));
    }

    #[test]
    fn test_malformed_manifest_degrades_to_empty() {
        let tables = RelationshipTables::from_manifest(Some(b"<Relationships><Relationship Id=\"rId1\""));
        assert_eq!(tables.hyperlink_count(), 0);
        assert_eq!(tables.image_count(), 0);
    }
}
