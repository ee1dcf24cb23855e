//! Conversions from external infrastructure errors into domain errors.

use minutesync_domain::MinuteSyncError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use std::io::Error as IoError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MinuteSyncError);

impl From<InfraError> for MinuteSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MinuteSyncError> for InfraError {
    fn from(value: MinuteSyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoMinuteSyncError {
    fn into_minutesync(self) -> MinuteSyncError;
}

/// Domain error for a non-success HTTP status.
pub fn status_error(code: u16, detail: &str) -> MinuteSyncError {
    let message = if detail.is_empty() {
        format!("HTTP {code}")
    } else {
        format!("HTTP {code}: {detail}")
    };
    match code {
        401 | 403 => MinuteSyncError::Auth(message),
        404 => MinuteSyncError::NotFound(message),
        429 => MinuteSyncError::RateLimited(message),
        400..=499 => MinuteSyncError::InvalidInput(message),
        _ => MinuteSyncError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MinuteSyncError */
/* -------------------------------------------------------------------------- */

impl IntoMinuteSyncError for HttpError {
    fn into_minutesync(self) -> MinuteSyncError {
        if self.is_timeout() {
            return MinuteSyncError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return MinuteSyncError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            return status_error(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
            );
        }

        if self.is_decode() {
            return MinuteSyncError::MalformedOutput(format!("invalid response body: {self}"));
        }

        MinuteSyncError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_minutesync())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → MinuteSyncError */
/* -------------------------------------------------------------------------- */

impl IntoMinuteSyncError for IoError {
    fn into_minutesync(self) -> MinuteSyncError {
        match self.kind() {
            std::io::ErrorKind::NotFound => MinuteSyncError::NotFound(self.to_string()),
            _ => MinuteSyncError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_minutesync())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml → MinuteSyncError */
/* -------------------------------------------------------------------------- */

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(MinuteSyncError::Storage(format!("invalid JSON: {value}")))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(MinuteSyncError::Config(format!("invalid TOML: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
