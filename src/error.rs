//! Error types for the client library.

use thiserror::Error;

/// Failures surfaced by the client and the typed API layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection, timeout, malformed response).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the credential with HTTP 401. By the time a
    /// caller sees this the session has been cleared and a redirect to the
    /// login destination has been issued; the error is still propagated so
    /// page-level handling can react before the navigation completes.
    #[error("unauthorized: session cleared, login required")]
    Unauthorized,

    /// The backend answered with a domain-level failure in its response
    /// envelope (`status: false`).
    #[error("{0}")]
    Api(String),

    /// A non-401 HTTP failure status with no usable envelope.
    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
