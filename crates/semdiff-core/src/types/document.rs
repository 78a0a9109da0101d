//! Input document model: two vocabularies plus the declared overlaps between them.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{SemDiffError, SemDiffResult};

/// Which side of the comparison a vocabulary sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Network1,
    Network2,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Network1 => f.write_str("network1"),
            Network::Network2 => f.write_str("network2"),
        }
    }
}

/// A single JSON-LD context entry for a field or type name.
///
/// Contexts map names either to a bare type identifier or to an object that
/// may carry an `@id`. Anything that is neither a string nor an object with a
/// string `@id` ends up as `Structured { id: None }`, which never resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextEntry {
    PlainType(String),
    StructuredType { id: Option<String> },
}

impl From<serde_json::Value> for ContextEntry {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => ContextEntry::PlainType(s),
            serde_json::Value::Object(mut map) => {
                let id = match map.remove("@id") {
                    Some(serde_json::Value::String(id)) => Some(id),
                    _ => None,
                };
                ContextEntry::StructuredType { id }
            }
            _ => ContextEntry::StructuredType { id: None },
        }
    }
}

impl<'de> Deserialize<'de> for ContextEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(ContextEntry::from)
    }
}

/// Context of one schema: field or type name to entry.
pub type SchemaContext = IndexMap<String, ContextEntry>;

/// A JSON Schema definition. Only the title and the property names matter here.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDef {
    pub title: String,
    #[serde(default)]
    pub properties: IndexMap<String, serde_json::Value>,
}

/// One side's schemas and their JSON-LD contexts, both keyed by schema key.
#[derive(Debug, Clone, Deserialize)]
pub struct Vocabulary {
    pub name: String,
    pub schemas: IndexMap<String, SchemaDef>,
    #[serde(default)]
    pub contexts: IndexMap<String, SchemaContext>,
}

impl Vocabulary {
    /// Look up a schema by key.
    pub fn schema(&self, schema_key: &str) -> Option<&SchemaDef> {
        self.schemas.get(schema_key)
    }

    /// Look up the context mapping for a schema key.
    pub fn context(&self, schema_key: &str) -> Option<&SchemaContext> {
        self.contexts.get(schema_key)
    }
}

#[derive(Deserialize)]
struct CorrespondenceTable {
    #[serde(rename = "overlapping fields", default)]
    overlapping_fields: Vec<(String, String)>,
}

#[derive(Deserialize)]
struct WireOverlap((String, String), CorrespondenceTable);

/// A declared correspondence between a network1 schema and a network2 schema.
///
/// On the wire: `[[typeName1, typeName2], {"overlapping fields": [[f1, f2], ...]}]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireOverlap")]
pub struct OverlapDeclaration {
    pub type_name1: String,
    pub type_name2: String,
    /// `(field in schema1, field in schema2)` pairs, in declaration order.
    pub field_correspondence: Vec<(String, String)>,
}

impl From<WireOverlap> for OverlapDeclaration {
    fn from(wire: WireOverlap) -> Self {
        let WireOverlap((type_name1, type_name2), table) = wire;
        Self {
            type_name1,
            type_name2,
            field_correspondence: table.overlapping_fields,
        }
    }
}

impl OverlapDeclaration {
    /// Create a declaration without any field correspondence.
    pub fn new(type_name1: impl Into<String>, type_name2: impl Into<String>) -> Self {
        Self {
            type_name1: type_name1.into(),
            type_name2: type_name2.into(),
            field_correspondence: Vec::new(),
        }
    }

    /// Add a field correspondence pair.
    pub fn with_field(mut self, field1: impl Into<String>, field2: impl Into<String>) -> Self {
        self.field_correspondence.push((field1.into(), field2.into()));
        self
    }
}

/// The full comparison document consumed by the classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonDocument {
    pub network1: Vocabulary,
    pub network2: Vocabulary,
    pub overlaps: Vec<OverlapDeclaration>,
}

impl ComparisonDocument {
    /// Parse a document from a JSON string.
    pub fn from_json_str(content: &str) -> SemDiffResult<Self> {
        serde_json::from_str(content).map_err(SemDiffError::from_document_json)
    }

    /// Convert an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> SemDiffResult<Self> {
        serde_json::from_value(value).map_err(SemDiffError::from_document_json)
    }

    /// Read and parse a document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> SemDiffResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Get a vocabulary by side.
    pub fn vocabulary(&self, network: Network) -> &Vocabulary {
        match network {
            Network::Network1 => &self.network1,
            Network::Network2 => &self.network2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_context_entry_variants() {
        assert_eq!(
            ContextEntry::from(json!("schema:name")),
            ContextEntry::PlainType("schema:name".to_string())
        );
        assert_eq!(
            ContextEntry::from(json!({"@id": "schema:Person", "@type": "@id"})),
            ContextEntry::StructuredType {
                id: Some("schema:Person".to_string())
            }
        );
        assert_eq!(
            ContextEntry::from(json!({})),
            ContextEntry::StructuredType { id: None }
        );
        assert_eq!(
            ContextEntry::from(json!(1.1)),
            ContextEntry::StructuredType { id: None }
        );
        assert_eq!(
            ContextEntry::from(json!({"@id": 7})),
            ContextEntry::StructuredType { id: None }
        );
    }

    #[test]
    fn test_overlap_wire_shape() {
        let decl: OverlapDeclaration = serde_json::from_value(json!([
            ["Foo", "Bar"],
            {"overlapping fields": [["name", "label"], ["id", "identifier"]]}
        ]))
        .unwrap();

        assert_eq!(
            decl,
            OverlapDeclaration::new("Foo", "Bar")
                .with_field("name", "label")
                .with_field("id", "identifier")
        );
    }

    #[test]
    fn test_overlap_without_fields_table_entry() {
        let decl: OverlapDeclaration =
            serde_json::from_value(json!([["Foo", "Bar"], {}])).unwrap();
        assert!(decl.field_correspondence.is_empty());
    }

    #[test]
    fn test_properties_keep_document_order() {
        let schema: SchemaDef = serde_json::from_str(
            r#"{"title": "Z", "properties": {"zeta": {}, "alpha": {}, "mid": {}}}"#,
        )
        .unwrap();
        let keys: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_missing_top_level_key_is_malformed() {
        let err = ComparisonDocument::from_value(json!({
            "network1": {"name": "A", "schemas": {}},
            "overlaps": []
        }))
        .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DocInvalidShape);
        assert!(err.to_string().contains("network2"));
    }
}
