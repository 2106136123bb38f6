//! Error types.

use thiserror::Error;

/// Any failure while obtaining a reply from the chat collaborator.
///
/// The widget treats every variant the same way (fallback message, input
/// re-enabled); the variants exist so operators can tell failures apart
/// in logs.
#[derive(Error, Debug)]
pub enum ExchangeFailed {
    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collaborator answered with a non-success status.
    #[error("collaborator returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// The response body was not the expected `{ "response": string }` shape.
    #[error("malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure loading an intent catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read intent catalog {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid intent JSON.
    #[error("invalid intent catalog {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
