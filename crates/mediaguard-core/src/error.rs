//! Error types for MediaGuard

/// Result type alias using MediaGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for MediaGuard operations.
///
/// The first three variants are the upstream-call failure taxonomy; all of
/// them collapse to the `analysis_failed` label at the engine boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure reaching an upstream service
    #[error("network error: {0}")]
    Network(String),

    /// Upstream service answered with a non-2xx status
    #[error("upstream status {status}: {detail}")]
    HttpStatus {
        /// HTTP status code returned by the service
        status: u16,
        /// Response body, truncated for diagnostics
        detail: String,
    },

    /// Upstream response did not match the expected schema
    #[error("unexpected response schema: {0}")]
    Schema(String),

    /// Caller supplied input the engine cannot analyze
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors (policy and config file loading)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new upstream-status error
    pub fn http_status(status: u16, detail: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            detail: detail.into(),
        }
    }

    /// Create a new schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a new invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable short name for the error kind, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::HttpStatus { .. } => "http_status",
            Self::Schema(_) => "schema",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}
