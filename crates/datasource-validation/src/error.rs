// Error types for datasource validation

use std::fmt;
use thiserror::Error;

/// The kinds of problems a field can report.
///
/// These are returned as data inside the error tree, never raised.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ValidationErrorKind {
    /// The datasource name is empty or blank
    NameRequired,

    /// A required variable has no value
    RequiredMissing { field: String },

    /// A `yaml` variable does not parse
    InvalidYaml,

    /// A `multi` variable holds something other than a sequence
    InvalidMultiFormat,
}

impl ValidationErrorKind {
    /// Get the error code for this error kind
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationErrorKind::NameRequired => "DS-1-01",
            ValidationErrorKind::RequiredMissing { .. } => "DS-1-02",
            ValidationErrorKind::InvalidYaml => "DS-1-03",
            ValidationErrorKind::InvalidMultiFormat => "DS-1-04",
        }
    }

    /// Format the human-readable message shown next to the field
    pub fn message(&self) -> String {
        match self {
            ValidationErrorKind::NameRequired => "Name is required".to_string(),
            ValidationErrorKind::RequiredMissing { field } => format!("{} is required", field),
            ValidationErrorKind::InvalidYaml => "Invalid YAML format".to_string(),
            ValidationErrorKind::InvalidMultiFormat => "Invalid format".to_string(),
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// A YAML syntax error from the structured-text check.
///
/// Only used to decide whether a value is valid; the parser's message is
/// kept for logging and never reaches the error tree.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("YAML syntax error: {message}")]
pub struct YamlSyntaxError {
    pub message: String,
}

impl From<yaml_rust2::ScanError> for YamlSyntaxError {
    fn from(err: yaml_rust2::ScanError) -> Self {
        YamlSyntaxError {
            message: err.to_string(),
        }
    }
}
