//! Error types for the notion-leaves library

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the notion-leaves library
///
/// The date and grouping helpers never fail; these variants only come out of
/// configuration, the Notion client and the CLI lookups.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Notion answered with a non-success status
    #[error("Notion API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Required configuration value is blank
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// Date expression could not be parsed
    #[error("Invalid date expression: {0}")]
    InvalidDateExpression(String),

    /// No leave record with the requested id
    #[error("Leave record not found: {0}")]
    RecordNotFound(String),
}
