//! Context coverage and report statistics.
//!
//! Coverage tells how much of a schema its JSON-LD context actually maps: the
//! fields that drop out of a report because nothing resolves them show up
//! here as `unmapped`.

use serde::Serialize;

use crate::config::ClassifierConfig;
use crate::resolver::lookup_type;
use crate::types::{Network, Report, SchemaContext, SchemaDef, Vocabulary};

/// Partition of a schema's properties by whether the context resolves them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContextCoverage {
    pub mapped: Vec<String>,
    pub unmapped: Vec<String>,
}

impl ContextCoverage {
    /// Fraction of considered fields that are mapped; `1.0` for a schema with no fields.
    pub fn ratio(&self) -> f64 {
        let total = self.mapped.len() + self.unmapped.len();
        if total == 0 {
            1.0
        } else {
            self.mapped.len() as f64 / total as f64
        }
    }
}

/// Coverage of one schema in one vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaCoverage {
    pub network: Network,
    pub schema_key: String,
    #[serde(flatten)]
    pub coverage: ContextCoverage,
}

/// Split a schema's non-ignored properties into mapped and unmapped, in declaration order.
pub fn context_coverage(
    schema: &SchemaDef,
    context: Option<&SchemaContext>,
    config: &ClassifierConfig,
) -> ContextCoverage {
    let mut coverage = ContextCoverage::default();
    for field in schema.properties.keys() {
        if config.is_ignored(field) {
            continue;
        }
        if lookup_type(context, field).is_some() {
            coverage.mapped.push(field.clone());
        } else {
            coverage.unmapped.push(field.clone());
        }
    }
    coverage
}

/// Coverage of every schema in a vocabulary, in schema order.
pub fn vocabulary_coverage(
    vocabulary: &Vocabulary,
    network: Network,
    config: &ClassifierConfig,
) -> Vec<SchemaCoverage> {
    vocabulary
        .schemas
        .iter()
        .map(|(key, schema)| SchemaCoverage {
            network,
            schema_key: key.clone(),
            coverage: context_coverage(schema, vocabulary.context(key), config),
        })
        .collect()
}

/// Counts derived from a finished report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub overlapped_schemas: usize,
    pub isolated_network1: usize,
    pub isolated_network2: usize,
    /// Rows in overlap entries with both sides populated.
    pub shared_fields: usize,
    /// Rows in overlap entries present only in network1.
    pub network1_only_fields: usize,
    /// Rows in overlap entries present only in network2.
    pub network2_only_fields: usize,
}

impl ReportSummary {
    pub fn from_report(report: &Report) -> Self {
        let mut summary = Self {
            overlapped_schemas: report.overlapped().len(),
            ..Default::default()
        };

        for entry in report.overlapped().values() {
            for row in &entry.fields {
                if row.is_shared() {
                    summary.shared_fields += 1;
                } else if row.field2.is_absent() {
                    summary.network1_only_fields += 1;
                } else {
                    summary.network2_only_fields += 1;
                }
            }
        }

        for entry in report.isolated().values() {
            if entry.schemas.title2.is_absent() {
                summary.isolated_network1 += 1;
            } else {
                summary.isolated_network2 += 1;
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContextEntry;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> SchemaDef {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_context_coverage_partitions_fields() {
        let schema = schema(json!({
            "title": "Sample",
            "properties": {"@id": {}, "name": {}, "weight": {}, "colour": {}}
        }));
        let mut ctx = SchemaContext::new();
        ctx.insert("name".into(), ContextEntry::PlainType("schema:name".into()));
        ctx.insert("weight".into(), ContextEntry::StructuredType { id: None });

        let coverage = context_coverage(&schema, Some(&ctx), &ClassifierConfig::default());
        assert_eq!(coverage.mapped, vec!["name".to_string()]);
        assert_eq!(coverage.unmapped, vec!["weight".to_string(), "colour".to_string()]);
        assert!((coverage.ratio() - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_schema_is_fully_covered() {
        let schema = schema(json!({"title": "Empty"}));
        let coverage = context_coverage(&schema, None, &ClassifierConfig::default());
        assert_eq!(coverage.ratio(), 1.0);
    }

    #[test]
    fn test_summary_counts() {
        let report: Report = serde_json::from_value(json!({
            "header": ["", "A", "B"],
            "content": {
                "overlapped_schemas": {
                    "overlap0": {
                        "schemas": ["ex:Foo", "Foo", "Bar"],
                        "fields": [
                            ["ex:name", "name", "label"],
                            ["ex:age", "age", false],
                            ["ex:color", false, "color"],
                            ["ex:size", false, "size"]
                        ]
                    }
                },
                "isolated_schemas": {
                    "schema1": {"schemas": [null, "Baz", false], "fields": []},
                    "schema3": {"schemas": ["ex:Qux", false, "Qux"], "fields": []}
                }
            }
        }))
        .unwrap();

        let summary = ReportSummary::from_report(&report);
        assert_eq!(
            summary,
            ReportSummary {
                overlapped_schemas: 1,
                isolated_network1: 1,
                isolated_network2: 1,
                shared_fields: 1,
                network1_only_fields: 1,
                network2_only_fields: 2,
            }
        );
    }
}
