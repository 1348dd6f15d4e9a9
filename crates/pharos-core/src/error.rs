use thiserror::Error;

/// Top-level error type for Pharos.
#[derive(Debug, Error)]
pub enum PharosError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure at the remote content boundary.
///
/// Resolver operations never hand this to their callers; it only decides
/// whether the fallback corpus (or an empty result) is substituted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS, or TLS failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// No backend is configured.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
