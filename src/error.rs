//! Error handling types and utilities.

/// A specialized Result type for dochost operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by resolution and search query construction.
///
/// Provider and backend failures carry the external error verbatim; this
/// crate performs no retries and no fallback for either.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required configuration is missing or invalid. Fatal at startup,
    /// never handled per-request.
    #[error("invalid serving configuration: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("failed to parse serving configuration")]
    ConfigParse(#[from] toml::de::Error),

    /// The project data provider failed a lookup (e.g. default version).
    #[error("data provider lookup failed: {0}")]
    Provider(anyhow::Error),

    /// The search backend rejected or failed a request. Unparsable query
    /// strings surface here too; query text is never pre-validated.
    #[error("search backend request failed: {0}")]
    Backend(anyhow::Error),
}

impl Error {
    /// Wrap an opaque data-provider failure.
    pub fn provider(err: impl Into<anyhow::Error>) -> Self {
        Self::Provider(err.into())
    }

    /// Wrap an opaque search-backend failure.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}
