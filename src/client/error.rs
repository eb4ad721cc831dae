use thiserror::Error;

use crate::validation::ValidationReport;

/// Failures surfaced by the client controllers. Validation failures never
/// reach the network; transport and format failures carry one user-facing
/// message each.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with something that is not JSON
    #[error("The server returned {content_type} instead of JSON. Status: {status}")]
    NonJsonResponse { status: u16, content_type: String },

    /// The backend answered JSON with an error status; message extracted
    /// from its `error`/`message` field
    #[error("{0}")]
    Api(String),

    /// Field validation failed before any request was made
    #[error("Please correct the errors in the form")]
    Validation(ValidationReport),

    #[error("{0}")]
    Unsupported(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Field-level errors when validation blocked the submission
    pub fn field_errors(&self) -> Option<&std::collections::HashMap<String, String>> {
        match self {
            ClientError::Validation(report) => Some(&report.errors),
            _ => None,
        }
    }
}
