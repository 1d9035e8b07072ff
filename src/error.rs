//! Error types.
//!
//! Three regimes: contract violations (missing id, missing token) fail fast;
//! upstream data defects are repaired in place and never surface; collaborator
//! failures during related-person lookup are logged and skipped, so only the
//! HTTP layer and the primary-record contract actually return these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The upstream API guarantees an id on every person record; its absence
    /// is a broken contract, not recoverable data.
    #[error("person record has no usable id")]
    MissingId,

    #[error("API token is not configured")]
    MissingToken,

    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(err) => err.is_timeout() || err.is_connect(),
            Error::Api { status, .. } => matches!(status, 408 | 429) || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_status_retryability() {
        let err = |status| Error::Api {
            status,
            message: String::new(),
        };
        assert!(err(429).is_retryable());
        assert!(err(408).is_retryable());
        assert!(err(500).is_retryable());
        assert!(err(503).is_retryable());
        assert!(!err(401).is_retryable());
        assert!(!err(404).is_retryable());
    }

    #[test]
    fn test_contract_errors_not_retryable() {
        assert!(!Error::MissingId.is_retryable());
        assert!(!Error::MissingToken.is_retryable());
    }
}
