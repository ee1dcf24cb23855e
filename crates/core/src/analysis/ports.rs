//! Port interfaces for text analysis

use async_trait::async_trait;
use minutesync_domain::MinuteSyncError;
use thiserror::Error;

/// Failure reported by an LLM completion backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl CompletionError {
    /// Whether this failure is the service asking us to slow down.
    ///
    /// Besides the dedicated variant and HTTP 429, quota wording in any
    /// message counts: some providers report exhaustion with other statuses.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::Api { status: 429, .. } => true,
            Self::Api { message, .. }
            | Self::Authentication(message)
            | Self::Network(message)
            | Self::InvalidResponse(message) => mentions_quota(message),
        }
    }
}

fn mentions_quota(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("429")
        || lower.contains("quota exceeded")
        || lower.contains("resource exhausted")
        || lower.contains("resource_exhausted")
        || lower.contains("resourceexhausted")
}

impl From<CompletionError> for MinuteSyncError {
    fn from(err: CompletionError) -> Self {
        if err.is_rate_limit() {
            return MinuteSyncError::RateLimited(err.to_string());
        }
        match err {
            CompletionError::Authentication(msg) => MinuteSyncError::Auth(msg),
            CompletionError::Network(msg) => MinuteSyncError::Network(msg),
            CompletionError::InvalidResponse(msg) => MinuteSyncError::MalformedOutput(msg),
            other @ CompletionError::Api { .. } => MinuteSyncError::Internal(other.to_string()),
            CompletionError::RateLimited(msg) => MinuteSyncError::RateLimited(msg),
        }
    }
}

/// A text-completion service: prompt in, generated text out.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one prompt and return the generated text
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Short provider name for logs
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_rate_limit_signals() {
        assert!(CompletionError::RateLimited("slow down".into()).is_rate_limit());
        assert!(CompletionError::Api { status: 429, message: String::new() }.is_rate_limit());
        assert!(CompletionError::Api { status: 400, message: "Quota exceeded for metric".into() }
            .is_rate_limit());
        assert!(CompletionError::Network("RESOURCE_EXHAUSTED".into()).is_rate_limit());
        assert!(CompletionError::Api { status: 503, message: "Resource exhausted".into() }
            .is_rate_limit());
    }

    #[test]
    fn other_failures_are_not_rate_limits() {
        assert!(!CompletionError::Authentication("bad key".into()).is_rate_limit());
        assert!(!CompletionError::Api { status: 500, message: "boom".into() }.is_rate_limit());
        assert!(!CompletionError::InvalidResponse("no candidates".into()).is_rate_limit());
    }

    #[test]
    fn converts_into_domain_errors() {
        let err: MinuteSyncError = CompletionError::Authentication("bad key".into()).into();
        assert_eq!(err, MinuteSyncError::Auth("bad key".into()));

        let err: MinuteSyncError =
            CompletionError::Api { status: 429, message: "later".into() }.into();
        assert!(matches!(err, MinuteSyncError::RateLimited(_)));

        let err: MinuteSyncError = CompletionError::Network("timed out".into()).into();
        assert!(err.is_retryable());
    }
}
