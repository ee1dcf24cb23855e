//! Error mapping shared by the LLM backends

use minutesync_core::CompletionError;
use minutesync_domain::MinuteSyncError;

/// Map a non-success status and its body to a completion error.
pub(crate) fn error_for_status(provider: &str, status: u16, body: &str) -> CompletionError {
    let message = if body.trim().is_empty() {
        format!("{provider} returned HTTP {status}")
    } else {
        body.trim().to_string()
    };
    match status {
        401 | 403 => CompletionError::Authentication(format!("{provider} rejected the API key ({status})")),
        429 => CompletionError::RateLimited(message),
        _ => CompletionError::Api { status, message },
    }
}

/// Map a transport-level failure from [`crate::http::HttpClient`].
pub(crate) fn transport_error(err: MinuteSyncError) -> CompletionError {
    match err {
        MinuteSyncError::RateLimited(msg) => CompletionError::RateLimited(msg),
        MinuteSyncError::Auth(msg) => CompletionError::Authentication(msg),
        MinuteSyncError::Network(msg) => CompletionError::Network(msg),
        other => CompletionError::Network(other.to_string()),
    }
}
