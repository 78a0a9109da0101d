//! Report model handed to the rendering layer.
//!
//! The JSON shape is fixed: rows and schema tuples are three-element arrays,
//! and an absent side is the literal `false` rather than `null`.

use indexmap::IndexMap;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SemDiffResult;

/// One side of a row or schema tuple: a name, or `false` when that side has nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Slot(pub Option<String>);

impl Slot {
    pub fn name(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotVisitor;

        impl<'de> Visitor<'de> for SlotVisitor {
            type Value = Slot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or false")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Slot, E> {
                Ok(Slot::name(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Slot, E> {
                Ok(Slot(Some(v)))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Slot, E> {
                if v {
                    Err(E::invalid_value(de::Unexpected::Bool(true), &self))
                } else {
                    Ok(Slot::absent())
                }
            }
        }

        deserializer.deserialize_any(SlotVisitor)
    }
}

/// `[resolvedType, fieldName1-or-false, fieldName2-or-false]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub resolved_type: String,
    pub field1: Slot,
    pub field2: Slot,
}

impl FieldRow {
    /// A field both schemas share.
    pub fn shared(
        resolved_type: impl Into<String>,
        field1: impl Into<String>,
        field2: impl Into<String>,
    ) -> Self {
        Self {
            resolved_type: resolved_type.into(),
            field1: Slot::name(field1),
            field2: Slot::name(field2),
        }
    }

    /// A field present only on the network1 side.
    pub fn first_only(resolved_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            resolved_type: resolved_type.into(),
            field1: Slot::name(field),
            field2: Slot::absent(),
        }
    }

    /// A field present only on the network2 side.
    pub fn second_only(resolved_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            resolved_type: resolved_type.into(),
            field1: Slot::absent(),
            field2: Slot::name(field),
        }
    }

    pub fn is_shared(&self) -> bool {
        !self.field1.is_absent() && !self.field2.is_absent()
    }
}

impl Serialize for FieldRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.resolved_type)?;
        tup.serialize_element(&self.field1)?;
        tup.serialize_element(&self.field2)?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for FieldRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (resolved_type, field1, field2) = <(String, Slot, Slot)>::deserialize(deserializer)?;
        Ok(Self {
            resolved_type,
            field1,
            field2,
        })
    }
}

/// `[baseType, title1-or-false, title2-or-false]`.
///
/// The base type is always set on overlap entries; isolated schemas may lack
/// one, in which case it serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaTuple {
    pub base_type: Option<String>,
    pub title1: Slot,
    pub title2: Slot,
}

impl Serialize for SchemaTuple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.base_type)?;
        tup.serialize_element(&self.title1)?;
        tup.serialize_element(&self.title2)?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for SchemaTuple {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TupleVisitor;

        impl<'de> Visitor<'de> for TupleVisitor {
            type Value = SchemaTuple;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [baseType, title1, title2] array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SchemaTuple, A::Error> {
                let base_type = seq
                    .next_element::<Option<String>>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let title1 = seq
                    .next_element::<Slot>()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let title2 = seq
                    .next_element::<Slot>()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                Ok(SchemaTuple {
                    base_type,
                    title1,
                    title2,
                })
            }
        }

        deserializer.deserialize_tuple(3, TupleVisitor)
    }
}

/// A schema pair declared as overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapEntry {
    pub schemas: SchemaTuple,
    pub fields: Vec<FieldRow>,
}

/// A schema present in only one vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolatedEntry {
    pub schemas: SchemaTuple,
    pub fields: Vec<FieldRow>,
}

/// Both report sections, keyed `overlapN` and `schemaN` in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportContent {
    pub overlapped_schemas: IndexMap<String, OverlapEntry>,
    pub isolated_schemas: IndexMap<String, IsolatedEntry>,
}

/// The classification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// `["", network1 name, network2 name]`.
    pub header: [String; 3],
    pub content: ReportContent,
}

impl Report {
    /// Create an empty report for two named vocabularies.
    pub fn new(name1: impl Into<String>, name2: impl Into<String>) -> Self {
        Self {
            header: [String::new(), name1.into(), name2.into()],
            content: ReportContent::default(),
        }
    }

    pub fn overlapped(&self) -> &IndexMap<String, OverlapEntry> {
        &self.content.overlapped_schemas
    }

    pub fn isolated(&self) -> &IndexMap<String, IsolatedEntry> {
        &self.content.isolated_schemas
    }

    /// Serialize to a JSON value.
    pub fn to_value(&self) -> SemDiffResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to a JSON string, optionally pretty-printed.
    pub fn to_json_string(&self, pretty: bool) -> SemDiffResult<String> {
        let out = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_row_json_shape() {
        let row = FieldRow::first_only("schema:age", "age");
        assert_eq!(serde_json::to_value(&row).unwrap(), json!(["schema:age", "age", false]));

        let back: FieldRow = serde_json::from_value(json!(["schema:name", "name", "label"])).unwrap();
        assert_eq!(back, FieldRow::shared("schema:name", "name", "label"));
        assert!(back.is_shared());
    }

    #[test]
    fn test_schema_tuple_absent_base_type_is_null() {
        let tuple = SchemaTuple {
            base_type: None,
            title1: Slot::absent(),
            title2: Slot::name("Bar"),
        };
        let value = serde_json::to_value(&tuple).unwrap();
        assert_eq!(value, json!([null, false, "Bar"]));

        let back: SchemaTuple = serde_json::from_value(value).unwrap();
        assert_eq!(back, tuple);
    }

    #[test]
    fn test_slot_rejects_true() {
        assert!(serde_json::from_value::<Slot>(json!(true)).is_err());
    }

    #[test]
    fn test_empty_report_shape() {
        let report = Report::new("A", "B");
        assert_eq!(
            report.to_value().unwrap(),
            json!({
                "header": ["", "A", "B"],
                "content": {"overlapped_schemas": {}, "isolated_schemas": {}}
            })
        );
    }
}
