//! Error types for document loading and type generation.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Errors while acquiring a document from disk or text.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML: {source}")]
    InvalidYaml {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported YAML mapping key: {key}")]
    UnsupportedKey { key: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } | Self::ReadError { .. } => 3, // IO
            _ => 2,                                                  // Parse error
        }
    }
}

/// Errors during conversion of a document into declarations.
///
/// Every variant is terminal: the whole generation aborts, and the failing
/// fragment travels with the error so the offending part of the document can
/// be located.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("cannot find component {reference}")]
    UnresolvedReference { reference: String },

    #[error("cannot handle nested $ref {reference}")]
    NestedReference { reference: String },

    #[error("cannot convert schema fragment: {fragment}")]
    UnconvertibleSchema { fragment: Value },

    #[error("cannot handle parameter: {parameter}")]
    UnhandledParameter { parameter: Value },

    #[error("cannot handle operation {method} {path}: {fragment}")]
    UnhandledOperation {
        path: String,
        method: String,
        fragment: Value,
    },
}

impl GenerateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}
