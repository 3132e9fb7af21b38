//! Error types for wikiharvest.
//!
//! The cleaning pipeline itself is infallible (missing structure degrades to
//! empty fields); these errors cover the I/O layers around it.

/// Error type for fetching, schema loading, and serialization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport or protocol failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a usable page.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// File system failure while reading schemas or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A custom output schema was present but unusable.
    #[error("invalid schema: {0}")]
    Schema(String),
}

/// Result type alias for wikiharvest operations.
pub type Result<T> = std::result::Result<T, Error>;
