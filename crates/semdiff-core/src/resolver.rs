//! Field type resolution from JSON-LD context entries.

use crate::types::{ContextEntry, SchemaContext};

/// Resolve a context entry to its type identifier.
///
/// Plain entries resolve to themselves. Structured entries resolve to their
/// `@id` when it is present and non-empty, otherwise to `None`.
pub fn resolve_type(entry: &ContextEntry) -> Option<&str> {
    match entry {
        ContextEntry::PlainType(name) => Some(name.as_str()),
        ContextEntry::StructuredType { id: Some(id) } if !id.is_empty() => Some(id.as_str()),
        ContextEntry::StructuredType { .. } => None,
    }
}

/// Look up `name` in a schema context and resolve it.
///
/// `None` covers both a missing entry and an unresolvable one.
pub fn lookup_type<'a>(context: Option<&'a SchemaContext>, name: &str) -> Option<&'a str> {
    context.and_then(|ctx| ctx.get(name)).and_then(resolve_type)
}
