//! Error types for semdiff operations.
//!
//! Hard errors abort a classification and carry enough context (overlap index,
//! network, schema key) for the caller to point at the offending input.
//! Unresolvable field types are not errors; those rows are skipped.

use thiserror::Error;

use crate::types::Network;

/// Result type alias for semdiff operations.
pub type SemDiffResult<T> = Result<T, SemDiffError>;

/// Main error type for all semdiff operations.
#[derive(Error, Debug)]
pub enum SemDiffError {
    /// The input document does not have the expected top-level shape.
    #[error("Malformed document: {message}")]
    MalformedDocument { message: String, code: ErrorCode },

    /// An overlap declaration references a schema the vocabulary does not define.
    #[error("Overlap {overlap_index}: schema '{schema_key}' not found in {network}")]
    MissingSchema {
        overlap_index: usize,
        network: Network,
        schema_key: String,
    },

    /// An overlapped schema has no context mapping at all.
    #[error("Overlap {overlap_index}: no context for schema '{schema_key}' in {network}")]
    MissingContext {
        overlap_index: usize,
        network: Network,
        schema_key: String,
    },

    /// The shared concept's base type cannot be resolved from network1's context.
    #[error(
        "Overlap {overlap_index}: base type '{type_name}' is missing or unresolvable in the context of '{schema_key}'"
    )]
    MissingBaseType {
        overlap_index: usize,
        schema_key: String,
        type_name: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Document (DOC_xxx)
    DocInvalidShape,
    DocInvalidJson,

    // Overlap (OVL_xxx)
    OvlMissingSchema,
    OvlMissingContext,
    OvlMissingBaseType,

    // Configuration (CFG_xxx)
    CfgInvalid,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DocInvalidShape => "DOC_001",
            ErrorCode::DocInvalidJson => "DOC_002",
            ErrorCode::OvlMissingSchema => "OVL_001",
            ErrorCode::OvlMissingContext => "OVL_002",
            ErrorCode::OvlMissingBaseType => "OVL_003",
            ErrorCode::CfgInvalid => "CFG_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl SemDiffError {
    /// Create a malformed document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
            code: ErrorCode::DocInvalidShape,
        }
    }

    /// Wrap a serde failure raised while reading the input document.
    pub fn from_document_json(err: serde_json::Error) -> Self {
        let code = if err.is_syntax() || err.is_eof() {
            ErrorCode::DocInvalidJson
        } else {
            ErrorCode::DocInvalidShape
        };
        Self::MalformedDocument {
            message: err.to_string(),
            code,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedDocument { code, .. } => *code,
            Self::MissingSchema { .. } => ErrorCode::OvlMissingSchema,
            Self::MissingContext { .. } => ErrorCode::OvlMissingContext,
            Self::MissingBaseType { .. } => ErrorCode::OvlMissingBaseType,
            Self::Configuration(_) => ErrorCode::CfgInvalid,
            _ => ErrorCode::Internal,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::MalformedDocument { .. } => {
                Some("Expected a JSON object with 'network1', 'network2' and 'overlaps'")
            }
            Self::MissingSchema { .. } => Some(
                "Schema keys are derived as the lowercased type name plus the schema suffix",
            ),
            Self::MissingContext { .. } => {
                Some("Add a context mapping for the schema under the vocabulary's 'contexts'")
            }
            Self::MissingBaseType { .. } => Some(
                "The network1 context must map the overlap's first type name to a string or an object with '@id'",
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_schema_message_names_key() {
        let err = SemDiffError::MissingSchema {
            overlap_index: 2,
            network: Network::Network2,
            schema_key: "bar_schema.json".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::OvlMissingSchema);
        let msg = err.to_string();
        assert!(msg.contains("bar_schema.json"));
        assert!(msg.contains("network2"));
        assert!(msg.contains("Overlap 2"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_document_json_codes() {
        let syntax = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            SemDiffError::from_document_json(syntax).code(),
            ErrorCode::DocInvalidJson
        );

        let shape = serde_json::from_str::<Vec<String>>("{}").unwrap_err();
        assert_eq!(
            SemDiffError::from_document_json(shape).code(),
            ErrorCode::DocInvalidShape
        );
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::DocInvalidShape.as_str(), "DOC_001");
        assert_eq!(ErrorCode::OvlMissingBaseType.as_str(), "OVL_003");
    }
}
