//! Error types for the site layer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid content JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A required form field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    /// The message service rejected or failed the request.
    #[error("message delivery failed: {0}")]
    Delivery(String),

    #[error("could not open the mail client: {0}")]
    MailClient(String),
}

impl ContactError {
    /// Delivery failures caused by bad service credentials rather than
    /// transient problems.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::Delivery(message) => ["Service", "Template", "Invalid"]
                .iter()
                .any(|needle| message.contains(needle)),
            _ => false,
        }
    }
}
