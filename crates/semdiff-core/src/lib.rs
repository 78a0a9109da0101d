//! semdiff-core - Overlap classification between two JSON Schema / JSON-LD vocabularies.
//!
//! Given two vocabularies and a list of declared schema-pair overlaps, this
//! crate builds a normalized [`Report`] that a view layer can render without
//! further logic: which schema pairs overlap, which fields inside a pair are
//! shared or side-only, and which schemas exist in only one vocabulary.
//!
//! # Example
//!
//! ```ignore
//! use semdiff_core::{classify, ComparisonDocument};
//!
//! let doc = ComparisonDocument::from_file("overlap.json")?;
//! let report = classify(&doc)?;
//! println!("{}", report.to_json_string(true)?);
//! ```

pub mod classifier;
pub mod config;
pub mod coverage;
pub mod error;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use classifier::{classify, Classification, OverlapClassifier};
pub use config::{ClassifierConfig, DEFAULT_IGNORED_KEYS, DEFAULT_SCHEMA_SUFFIX};
pub use coverage::{context_coverage, ContextCoverage, ReportSummary, SchemaCoverage};
pub use error::{ErrorCode, SemDiffError, SemDiffResult};
pub use resolver::resolve_type;
pub use types::{
    ComparisonDocument, ContextEntry, FieldRow, IsolatedEntry, Network, OverlapDeclaration,
    OverlapEntry, Report, ReportContent, SchemaDef, SchemaTuple, Slot, Vocabulary,
};
