//! Configuration for the overlap classifier.

use serde::{Deserialize, Serialize};

use crate::error::{SemDiffError, SemDiffResult};

/// Keys that are JSON-LD / JSON Schema keywords rather than fields.
pub const DEFAULT_IGNORED_KEYS: [&str; 4] = ["@context", "@id", "@type", "$schema"];

/// Suffix appended to a lowercased type name to form a schema key.
pub const DEFAULT_SCHEMA_SUFFIX: &str = "_schema.json";

/// Classifier configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Extra property names to skip, on top of [`DEFAULT_IGNORED_KEYS`].
    pub extra_ignored_keys: Vec<String>,
    /// Schema key suffix.
    pub schema_suffix: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            extra_ignored_keys: Vec::new(),
            schema_suffix: DEFAULT_SCHEMA_SUFFIX.to_string(),
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> SemDiffResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        let config: Self = match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| SemDiffError::Configuration(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| SemDiffError::Configuration(e.to_string()))?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| SemDiffError::Configuration(e.to_string()))?,
            _ => {
                return Err(SemDiffError::Configuration(
                    "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(suffix) = std::env::var("SEMDIFF_SCHEMA_SUFFIX") {
            if !suffix.is_empty() {
                config.schema_suffix = suffix;
            }
        }
        if let Ok(keys) = std::env::var("SEMDIFF_EXTRA_IGNORED_KEYS") {
            config.extra_ignored_keys = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect();
        }

        config
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }

    /// Reject configurations the classifier cannot work with.
    pub fn validate(&self) -> SemDiffResult<()> {
        if self.schema_suffix.is_empty() {
            return Err(SemDiffError::Configuration(
                "schema_suffix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a property name is never emitted as a field.
    pub fn is_ignored(&self, key: &str) -> bool {
        DEFAULT_IGNORED_KEYS.contains(&key) || self.extra_ignored_keys.iter().any(|k| k == key)
    }

    /// `typeName` lowercased plus the suffix.
    pub fn schema_key(&self, type_name: &str) -> String {
        format!("{}{}", type_name.to_lowercase(), self.schema_suffix)
    }

    /// The type name a schema key was derived from: first character
    /// upper-cased, suffix removed.
    pub fn type_attribute(&self, schema_key: &str) -> String {
        let mut chars = schema_key.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        };
        capitalized.replacen(&self.schema_suffix, "", 1)
    }
}

/// Builder for ClassifierConfig.
#[derive(Default)]
pub struct ClassifierConfigBuilder {
    config: ClassifierConfig,
}

impl ClassifierConfigBuilder {
    /// Skip an additional property name.
    pub fn ignore_key(mut self, key: impl Into<String>) -> Self {
        self.config.extra_ignored_keys.push(key.into());
        self
    }

    /// Set the schema key suffix.
    pub fn schema_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.schema_suffix = suffix.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClassifierConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_schema_key_and_attribute() {
        let config = ClassifierConfig::default();
        assert_eq!(config.schema_key("Foo"), "foo_schema.json");
        assert_eq!(config.schema_key("AssayMethod"), "assaymethod_schema.json");
        assert_eq!(config.type_attribute("foo_schema.json"), "Foo");
        assert_eq!(config.type_attribute("assay_method_schema.json"), "Assay_method");
    }

    #[test]
    fn test_default_ignored_keys_always_apply() {
        let config = ClassifierConfig::builder().ignore_key("internal").build();
        for key in DEFAULT_IGNORED_KEYS {
            assert!(config.is_ignored(key));
        }
        assert!(config.is_ignored("internal"));
        assert!(!config.is_ignored("name"));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "schema_suffix = \"_schema.jsonld\"").unwrap();
        writeln!(file, "extra_ignored_keys = [\"@reverse\"]").unwrap();

        let config = ClassifierConfig::from_file(file.path()).unwrap();
        assert_eq!(config.schema_suffix, "_schema.jsonld");
        assert!(config.is_ignored("@reverse"));
    }

    #[test]
    fn test_from_yaml_file_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "extra_ignored_keys: [\"notes\"]").unwrap();

        let config = ClassifierConfig::from_file(file.path()).unwrap();
        assert_eq!(config.schema_suffix, DEFAULT_SCHEMA_SUFFIX);
        assert_eq!(config.extra_ignored_keys, vec!["notes".to_string()]);
    }

    #[test]
    fn test_rejects_unknown_extension_and_empty_suffix() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            ClassifierConfig::from_file(file.path()),
            Err(SemDiffError::Configuration(_))
        ));

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"schema_suffix": ""}}"#).unwrap();
        assert!(matches!(
            ClassifierConfig::from_file(file.path()),
            Err(SemDiffError::Configuration(_))
        ));
    }
}
