//! TextAnalysisClient - meeting notes in, analysis record out

use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use minutesync_domain::constants::{
    ANALYSIS_FAILED_PREFIX, ANALYSIS_INITIAL_BACKOFF_MS, ANALYSIS_MAX_ATTEMPTS,
    PARSE_FAILURE_ERROR, PARSE_FAILURE_SUMMARY,
};
use minutesync_domain::{AnalysisRecord, LlmConfig, MinuteSyncError};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::ports::CompletionBackend;
use super::prompt::build_prompt;
use super::response::parse_analysis;
use crate::utils::clock::Clock;

/// Retry schedule for rate-limited completions.
///
/// Only rate limits are retried. The delay doubles after every failed
/// attempt, starting from `initial_backoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: ANALYSIS_MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(ANALYSIS_INITIAL_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff.saturating_mul(1 << exponent)
    }
}

/// Why an analysis produced no usable record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisFailure {
    #[error("rate limit persisted after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("model reply is not a valid analysis: {reason}")]
    Malformed { reason: String, raw: String },

    #[error(transparent)]
    Service(#[from] MinuteSyncError),
}

impl AnalysisFailure {
    /// The well-formed, empty record that stands in for a failed analysis.
    pub fn into_record(self) -> AnalysisRecord {
        match self {
            Self::RateLimited { .. } => AnalysisRecord::rate_limited(),
            Self::Malformed { raw, .. } => {
                AnalysisRecord::degraded(PARSE_FAILURE_SUMMARY, Some(PARSE_FAILURE_ERROR.into()))
                    .with_raw_response(raw)
            }
            Self::Service(err) => AnalysisRecord::degraded(
                format!("{ANALYSIS_FAILED_PREFIX}: {err}"),
                Some(err.to_string()),
            ),
        }
    }
}

impl From<AnalysisFailure> for MinuteSyncError {
    fn from(failure: AnalysisFailure) -> Self {
        let message = failure.to_string();
        match failure {
            AnalysisFailure::RateLimited { .. } => Self::RateLimited(message),
            AnalysisFailure::Malformed { .. } => Self::MalformedOutput(message),
            AnalysisFailure::Service(err) => err,
        }
    }
}

/// Turns meeting notes into an [`AnalysisRecord`] through a completion
/// backend.
pub struct TextAnalysisClient {
    backend: Arc<dyn CompletionBackend>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
    retry: RetryPolicy,
}

impl TextAnalysisClient {
    /// `timezone` decides which calendar day counts as "today" in the prompt.
    pub fn new(backend: Arc<dyn CompletionBackend>, clock: Arc<dyn Clock>, timezone: Tz) -> Self {
        Self { backend, clock, timezone, retry: RetryPolicy::default() }
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Analyze notes; every failure degrades into a well-formed record.
    pub async fn analyze(&self, text: &str) -> AnalysisRecord {
        match self.try_analyze(text).await {
            Ok(record) => record,
            Err(failure) => {
                warn!(error = %failure, "analysis degraded");
                failure.into_record()
            }
        }
    }

    /// Analyze notes, reporting failures as a typed [`AnalysisFailure`].
    #[instrument(skip(self, text), fields(backend = self.backend.name(), chars = text.chars().count()))]
    pub async fn try_analyze(&self, text: &str) -> Result<AnalysisRecord, AnalysisFailure> {
        if text.trim().is_empty() {
            return Err(MinuteSyncError::InvalidInput("meeting notes are empty".into()).into());
        }

        let today = self.clock.now().with_timezone(&self.timezone).date_naive();
        let prompt = build_prompt(text, today);
        let reply = self.complete_with_retry(&prompt).await?;
        debug!(reply_chars = reply.len(), "received model reply");

        match parse_analysis(&reply) {
            Ok(record) => {
                info!(
                    todo_tasks = record.todo_tasks.len(),
                    schedule_items = record.schedule_items.len(),
                    "analysis complete"
                );
                Ok(record)
            }
            Err(err) => {
                Err(AnalysisFailure::Malformed { reason: err.to_string(), raw: reply.trim().to_string() })
            }
        }
    }

    async fn complete_with_retry(&self, prompt: &str) -> Result<String, AnalysisFailure> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.backend.complete(prompt).await {
                Ok(reply) => return Ok(reply),
                Err(err) if err.is_rate_limit() => {
                    if attempt >= max_attempts {
                        warn!(attempt, max_attempts, error = %err, "rate limit retries exhausted");
                        return Err(AnalysisFailure::RateLimited { attempts: attempt });
                    }
                    let delay = self.retry.delay_after(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "rate limited by completion backend, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(AnalysisFailure::Service(err.into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_from_initial_delay() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
        assert_eq!(policy.delay_after(2), Duration::from_secs(4));
        assert_eq!(policy.delay_after(3), Duration::from_secs(8));
    }

    #[test]
    fn failures_degrade_into_empty_records() {
        let record = AnalysisFailure::Malformed { reason: "eof".into(), raw: "oops".into() }
            .into_record();
        assert_eq!(record.summary, PARSE_FAILURE_SUMMARY);
        assert_eq!(record.raw_response.as_deref(), Some("oops"));
        assert!(record.todo_tasks.is_empty());

        let record = AnalysisFailure::Service(MinuteSyncError::Auth("bad key".into())).into_record();
        assert!(record.summary.starts_with(ANALYSIS_FAILED_PREFIX));
        assert!(record.summary.contains("bad key"));
        assert_eq!(record.error.as_deref(), Some("Authentication error: bad key"));
    }
}
