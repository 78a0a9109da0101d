//! Report output.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use semdiff_core::{Classification, Report, ReportSummary, SchemaCoverage};
use serde::Serialize;

#[derive(Serialize)]
struct SummaryOutput<'a> {
    report: &'a Report,
    summary: &'a ReportSummary,
    coverage: &'a [SchemaCoverage],
}

/// `{"report": ..., "summary": ..., "coverage": [...]}`.
pub fn render_with_summary(classification: &Classification, pretty: bool) -> Result<String> {
    let output = SummaryOutput {
        report: &classification.report,
        summary: &classification.summary,
        coverage: &classification.coverage,
    };
    let out = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(out)
}

/// Write to `path`, or stdout when no path is given.
pub fn write(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use semdiff_core::{ComparisonDocument, OverlapClassifier};
    use serde_json::json;

    fn classification() -> Classification {
        let doc = ComparisonDocument::from_value(json!({
            "network1": {
                "name": "A",
                "schemas": {"foo_schema.json": {"title": "Foo", "properties": {"name": {}}}},
                "contexts": {"foo_schema.json": {"Foo": "ex:Foo", "name": "ex:name"}}
            },
            "network2": {"name": "B", "schemas": {}},
            "overlaps": []
        }))
        .unwrap();
        OverlapClassifier::default().classify_with_summary(&doc).unwrap()
    }

    #[test]
    fn test_render_with_summary_shape() {
        let rendered = render_with_summary(&classification(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["report"]["header"], json!(["", "A", "B"]));
        assert_eq!(value["summary"]["isolated_network1"], json!(1));
        assert_eq!(value["coverage"][0]["schema_key"], json!("foo_schema.json"));
        assert_eq!(value["coverage"][0]["mapped"], json!(["name"]));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write(Some(&path), "{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }
}
