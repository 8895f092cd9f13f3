use thiserror::Error;

/// Crate-wide error taxonomy.
///
/// Three families matter to callers: transport failures (`HttpError`,
/// `NetworkError`, `ApiError`), protocol failures (`JsonError`,
/// `SerializationError`, `DeserializationError`, `ExchangeRejection`) and
/// resolution failures (`ProductNotFound`). Resolution failures are kept
/// distinct so callers can treat an unknown symbol as a configuration
/// error rather than a transient one.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Non-2xx HTTP status. The body is carried verbatim for diagnostics;
    /// no attempt is made to parse exchange error codes out of it.
    #[error("API error (status {status}): {body}")]
    ApiError { status: u16, body: String },

    /// The exchange answered 200 but set its own `success` flag to false.
    #[error("exchange rejected {operation} request")]
    ExchangeRejection { operation: &'static str },

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Other error: {0}")]
    Other(String),
}

impl ExchangeError {
    /// True when the failure means the symbol is unknown to the exchange,
    /// as opposed to the exchange being unreachable.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::ProductNotFound(_))
    }
}
