//! Error types for the renderer surfaces

use std::fmt;

use thiserror::Error;

/// Result type alias for rfmail operations
pub type Result<T> = std::result::Result<T, Error>;

/// A single problem found while validating block input
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationIssue {
    /// Dotted path to the offending field, e.g. `props.fixedWidths.1`
    pub path: String,
    /// Human readable description
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur outside the (infallible) rendering core
#[derive(Error, Debug)]
pub enum Error {
    /// Input did not match the block schema
    #[error("Validation failed: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// Input was not valid JSON or did not deserialize
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The block document could not be rendered
    #[error("Document error: {0}")]
    Document(String),

    /// Rendered markup could not be inspected
    #[error("Inspection failed: {0}")]
    Inspect(String),

    /// Invalid render configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Validation issues carried by this error, if any
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Error::Validation(issues) => issues,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_issue() {
        let err = Error::Validation(vec![
            ValidationIssue::new("props.columnsCount", "expected 2 or 3"),
            ValidationIssue::new("", "expected object"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("props.columnsCount: expected 2 or 3"));
        assert!(msg.contains("<root>: expected object"));
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn non_validation_errors_have_no_issues() {
        let err = Error::Document("missing root".into());
        assert!(err.issues().is_empty());
        assert_eq!(err.to_string(), "Document error: missing root");
    }
}
