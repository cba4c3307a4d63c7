/// Open Packaging Conventions (OPC) support.
///
/// This module covers the parts of the OPC specification a Word-to-Markdown
/// conversion needs: well-known part names and relationship types, and parsing
/// of relationship manifests into id lookup tables.

pub mod constants;
pub mod rel;

// Re-export commonly used types
pub use rel::{Relationship, RelationshipTables, Relationships};
