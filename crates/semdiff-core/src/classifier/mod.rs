//! Overlap classification.
//!
//! Turns a [`ComparisonDocument`] into a [`Report`] in three passes:
//!
//! 1. Declared overlaps, in document order, keyed `overlap{i}`.
//! 2. Network1 schemas not consumed by an overlap, keyed `schema{n}`.
//! 3. Network2 schemas not consumed by an overlap, continuing the same counter.
//!
//! The isolated counter advances once per schema visited, including schemas
//! skipped because an overlap already claimed them, so isolated keys can have
//! gaps.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::config::ClassifierConfig;
use crate::coverage::{vocabulary_coverage, ReportSummary, SchemaCoverage};
use crate::error::{SemDiffError, SemDiffResult};
use crate::resolver::lookup_type;
use crate::types::{
    ComparisonDocument, FieldRow, IsolatedEntry, Network, OverlapDeclaration, OverlapEntry,
    Report, SchemaTuple, Slot, Vocabulary,
};

/// Classify a document with the default configuration.
pub fn classify(doc: &ComparisonDocument) -> SemDiffResult<Report> {
    OverlapClassifier::default().classify(doc)
}

/// A report together with the numbers derived from it.
#[derive(Debug, Clone)]
pub struct Classification {
    pub report: Report,
    pub summary: ReportSummary,
    /// Context coverage for every schema of both vocabularies, network1 first.
    pub coverage: Vec<SchemaCoverage>,
}

/// Classifies declared overlaps and isolated schemas between two vocabularies.
#[derive(Debug, Clone, Default)]
pub struct OverlapClassifier {
    config: ClassifierConfig,
}

impl OverlapClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Build the report. The document is only read.
    pub fn classify(&self, doc: &ComparisonDocument) -> SemDiffResult<Report> {
        let mut report = Report::new(&doc.network1.name, &doc.network2.name);
        let mut processed1: HashSet<&str> = HashSet::new();
        let mut processed2: HashSet<&str> = HashSet::new();

        for (index, declaration) in doc.overlaps.iter().enumerate() {
            let (entry, key1, key2) = self.classify_overlap(doc, index, declaration)?;
            report
                .content
                .overlapped_schemas
                .insert(format!("overlap{}", index), entry);
            processed1.insert(key1);
            processed2.insert(key2);
        }
        debug!(
            overlaps = report.content.overlapped_schemas.len(),
            "overlap pass complete"
        );

        let mut counter = 0usize;
        let isolated = &mut report.content.isolated_schemas;
        self.isolated_pass(&doc.network1, Network::Network1, &processed1, &mut counter, isolated);
        self.isolated_pass(&doc.network2, Network::Network2, &processed2, &mut counter, isolated);
        debug!(
            isolated = isolated.len(),
            visited = counter,
            "isolated passes complete"
        );

        Ok(report)
    }

    /// Build the report plus its summary and per-schema context coverage.
    pub fn classify_with_summary(
        &self,
        doc: &ComparisonDocument,
    ) -> SemDiffResult<Classification> {
        let report = self.classify(doc)?;
        let summary = ReportSummary::from_report(&report);
        let mut coverage = vocabulary_coverage(&doc.network1, Network::Network1, &self.config);
        coverage.extend(vocabulary_coverage(
            &doc.network2,
            Network::Network2,
            &self.config,
        ));

        Ok(Classification {
            report,
            summary,
            coverage,
        })
    }

    fn classify_overlap<'d>(
        &self,
        doc: &'d ComparisonDocument,
        index: usize,
        declaration: &OverlapDeclaration,
    ) -> SemDiffResult<(OverlapEntry, &'d str, &'d str)> {
        let key1 = self.config.schema_key(&declaration.type_name1);
        let key2 = self.config.schema_key(&declaration.type_name2);

        let (key1, schema1) = doc.network1.schemas.get_key_value(&key1).ok_or_else(|| {
            SemDiffError::MissingSchema {
                overlap_index: index,
                network: Network::Network1,
                schema_key: key1.clone(),
            }
        })?;
        let (key2, schema2) = doc.network2.schemas.get_key_value(&key2).ok_or_else(|| {
            SemDiffError::MissingSchema {
                overlap_index: index,
                network: Network::Network2,
                schema_key: key2.clone(),
            }
        })?;

        // The shared concept's base type always comes from network1.
        let context1 = doc
            .network1
            .context(key1)
            .ok_or_else(|| SemDiffError::MissingContext {
                overlap_index: index,
                network: Network::Network1,
                schema_key: key1.clone(),
            })?;
        let base_type = lookup_type(Some(context1), &declaration.type_name1).ok_or_else(|| {
            SemDiffError::MissingBaseType {
                overlap_index: index,
                schema_key: key1.clone(),
                type_name: declaration.type_name1.clone(),
            }
        })?;
        let context2 = doc.network2.context(key2);

        let overlap_map = self.correspondence_map(declaration);
        let mut fields = Vec::new();

        for field in schema1.properties.keys() {
            if self.config.is_ignored(field) {
                continue;
            }
            let Some(resolved) = lookup_type(Some(context1), field) else {
                trace!(schema = %key1, field = %field, "no resolvable type, skipping");
                continue;
            };
            match overlap_map.get(field.as_str()) {
                Some(partner) => fields.push(FieldRow::shared(resolved, field, *partner)),
                None => fields.push(FieldRow::first_only(resolved, field)),
            }
        }

        for field in schema2.properties.keys() {
            if self.config.is_ignored(field) || overlap_map.contains_key(field.as_str()) {
                continue;
            }
            let Some(resolved) = lookup_type(context2, field) else {
                trace!(schema = %key2, field = %field, "no resolvable type, skipping");
                continue;
            };
            fields.push(FieldRow::second_only(resolved, field));
        }

        let entry = OverlapEntry {
            schemas: SchemaTuple {
                base_type: Some(base_type.to_string()),
                title1: Slot::name(&schema1.title),
                title2: Slot::name(&schema2.title),
            },
            fields,
        };
        Ok((entry, key1.as_str(), key2.as_str()))
    }

    /// Bidirectional field lookup; later pairs overwrite earlier ones.
    /// Pairs that name an ignored key on either side are dropped.
    fn correspondence_map<'a>(
        &self,
        declaration: &'a OverlapDeclaration,
    ) -> HashMap<&'a str, &'a str> {
        let mut map = HashMap::new();
        for (field1, field2) in &declaration.field_correspondence {
            if self.config.is_ignored(field1) || self.config.is_ignored(field2) {
                continue;
            }
            map.insert(field1.as_str(), field2.as_str());
            map.insert(field2.as_str(), field1.as_str());
        }
        map
    }

    fn isolated_pass(
        &self,
        vocabulary: &Vocabulary,
        network: Network,
        processed: &HashSet<&str>,
        counter: &mut usize,
        out: &mut IndexMap<String, IsolatedEntry>,
    ) {
        for (schema_key, schema) in &vocabulary.schemas {
            let index = *counter;
            *counter += 1;
            if processed.contains(schema_key.as_str()) {
                continue;
            }

            let context = vocabulary.context(schema_key);
            if context.is_none() {
                debug!(%network, schema = %schema_key, "isolated schema has no context");
            }
            let attribute = self.config.type_attribute(schema_key);
            let base_type = lookup_type(context, &attribute).map(String::from);

            let mut fields = Vec::new();
            for field in schema.properties.keys() {
                if self.config.is_ignored(field) {
                    continue;
                }
                let Some(resolved) = lookup_type(context, field) else {
                    trace!(
                        %network,
                        schema = %schema_key,
                        field = %field,
                        "no resolvable type, skipping"
                    );
                    continue;
                };
                fields.push(match network {
                    Network::Network1 => FieldRow::first_only(resolved, field),
                    Network::Network2 => FieldRow::second_only(resolved, field),
                });
            }

            let (title1, title2) = match network {
                Network::Network1 => (Slot::name(&schema.title), Slot::absent()),
                Network::Network2 => (Slot::absent(), Slot::name(&schema.title)),
            };
            out.insert(
                format!("schema{}", index),
                IsolatedEntry {
                    schemas: SchemaTuple {
                        base_type,
                        title1,
                        title2,
                    },
                    fields,
                },
            );
        }
    }
}
