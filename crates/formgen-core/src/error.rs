//! Error types for form generation
//!
//! Configuration errors name the field that caused them so a caller can
//! point the user back at the offending answer or snapshot key.

use std::path::PathBuf;
use thiserror::Error;

/// A configuration invariant that does not hold
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("formName: '{0}' is not a valid identifier")]
    InvalidFormName(String),

    #[error("inputFields[{index}].name: '{name}' is not a valid identifier")]
    InvalidFieldName { index: usize, name: String },

    #[error("inputFields[{index}].name: '{name}' is used by more than one field")]
    DuplicateFieldName { index: usize, name: String },

    #[error("inputFields[{index}].type: unknown input type '{value}'")]
    UnknownFieldType { index: usize, value: String },

    #[error("buttons[{index}].variant: unknown button variant '{value}'")]
    UnknownButtonVariant { index: usize, value: String },

    #[error("buttons[{index}].name: button text cannot be empty")]
    EmptyButtonName { index: usize },

    #[error("routerType: unknown routing style '{0}' (expected 'app' or 'pages')")]
    UnknownRoutingStyle(String),

    #[error("buttons: the form needs at least one button")]
    NoButtons,

    #[error("submitButtonIndex: {index} does not reference a button (expected 1..={count})")]
    SubmitIndexOutOfRange { index: usize, count: usize },

    #[error("{key}: missing value")]
    Missing { key: &'static str },

    #[error("{key}: '{value}' is not a #RRGGBB hex color")]
    InvalidColor { key: &'static str, value: String },

    #[error("{key}: '{value}' must not contain quotes, backslashes or whitespace")]
    InvalidPersistenceName { key: &'static str, value: String },

    #[error("useServerActions: server actions require the 'app' routing style")]
    DelegatedSubmissionRequiresApp,

    #[error("createApiRoute: saving to the database without server actions needs the API route")]
    EndpointRequired,

    #[error("formWidth: '{0}' must not contain quotes, braces or angle brackets")]
    InvalidWidth(String),
}

/// Failure while composing the artifact set
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    Spec(#[from] SpecError),

    #[error("failed to serialize configuration snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("{role} artifact does not contain `{expected}`")]
    Inconsistent { role: String, expected: String },
}

/// Failure reading a saved configuration snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: SpecError,
    },
}

/// Failure writing generated artifacts
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
