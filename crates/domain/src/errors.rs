//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for MinuteSync
///
/// The pipeline-specific variants (`RateLimited`, `MalformedOutput`,
/// `ResourceUnavailable`, `BookingFailed`, `InvalidDateTime`) never abort a
/// whole run: analysis failures are folded into a degraded record and sync
/// failures into the report. Only `Config` is fatal, and only at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MinuteSyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Booking failed: {0}")]
    BookingFailed(String),

    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MinuteSyncError {
    /// Whether retrying the same call later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::Network(_))
    }
}

/// Result type alias for MinuteSync operations
pub type Result<T> = std::result::Result<T, MinuteSyncError>;
