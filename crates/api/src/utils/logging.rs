//! Tracing subscriber bootstrap

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "minutesync=info,minutesync_app=info,minutesync_core=info,minutesync_infra=info";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter. Logs go to stderr so stdout
/// stays free for the formatted results.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    // A second init (tests, embedding) keeps the first subscriber.
    let result = if json {
        registry.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).try_init()
    };
    if let Err(err) = result {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}

/// Stable label for an error, used as a structured log field.
pub fn error_label(error: &minutesync_domain::MinuteSyncError) -> &'static str {
    use minutesync_domain::MinuteSyncError;
    match error {
        MinuteSyncError::Config(_) => "config",
        MinuteSyncError::Network(_) => "network",
        MinuteSyncError::Auth(_) => "auth",
        MinuteSyncError::RateLimited(_) => "rate_limited",
        MinuteSyncError::MalformedOutput(_) => "malformed_output",
        MinuteSyncError::ResourceUnavailable(_) => "resource_unavailable",
        MinuteSyncError::BookingFailed(_) => "booking_failed",
        MinuteSyncError::InvalidDateTime(_) => "invalid_datetime",
        MinuteSyncError::InvalidInput(_) => "invalid_input",
        MinuteSyncError::NotFound(_) => "not_found",
        MinuteSyncError::Storage(_) => "storage",
        MinuteSyncError::Internal(_) => "internal",
    }
}
