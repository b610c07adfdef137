use thiserror::Error;

/// Error types for the Machine Translation module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// The provider rejected the credential (missing, malformed or revoked key)
    #[error("Authentication error: {0}")]
    Auth(String),
    /// The account's character quota is used up
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),
    /// Too many requests in a short time
    #[error("Rate limited: {0}")]
    RateLimited(String),
    /// Language code is malformed or not supported for this direction
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    /// Provider could not be set up
    #[error("Configuration error: {0}")]
    Config(String),
    /// Transport failure before a response was received
    #[error("Network error: {0}")]
    Network(String),
    /// Any other failure reported by the provider
    #[error("Translation error: {0}")]
    Translation(String),
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        MtError::Network(err.to_string())
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
