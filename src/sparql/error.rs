//! Error types for SPARQL query transport
//!
//! These errors come from the layer that talks to the remote endpoint.
//! They are surfaced to callers unchanged; nothing in this crate retries.

use thiserror::Error;

/// Errors that can occur while submitting a query to the endpoint
#[derive(Error, Debug)]
pub enum QueryError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status code
    #[error("SPARQL endpoint returned status {0}")]
    Status(u16),

    /// Response body is not a SPARQL JSON result document
    #[error("Failed to decode SPARQL response: {0}")]
    Decode(String),

    /// Result document does not have the shape the query form implies
    #[error("Unexpected SPARQL result shape: {0}")]
    UnexpectedShape(String),

    /// Transport settings that cannot be turned into a request
    #[error("Invalid transport configuration: {0}")]
    InvalidConfig(String),
}

impl QueryError {
    /// Check if this error came from the network and might succeed later
    ///
    /// Retry on:
    /// - transport failures (connect, timeout)
    /// - 429 (Too Many Requests)
    /// - 5xx (endpoint overloaded or down)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Status(code) => *code == 429 || (500..600).contains(code),
            Self::Decode(_) | Self::UnexpectedShape(_) | Self::InvalidConfig(_) => false,
        }
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
