//! Application configuration structures
//!
//! Built once at startup (see `minutesync_infra::config`) and handed to the
//! constructors that need it. Nothing in the core reads the environment.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ANALYSIS_INITIAL_BACKOFF_MS, ANALYSIS_MAX_ATTEMPTS, BACKUP_INTERVAL_MINUTES,
    DEFAULT_BOOKING_LANGUAGE, DEFAULT_DURATION_MINUTES, DEFAULT_MEETING_HOUR,
    DEFAULT_MEETING_OFFSET_DAYS, DEFAULT_TASK_HOUR, DEFAULT_TASK_OFFSET_DAYS, DEFAULT_TIMEZONE,
    LLM_TIMEOUT_SECS, SCHEDULER_TIMEOUT_SECS, SYSTEM_ATTENDEE_EMAIL, SYSTEM_ATTENDEE_NAME,
};
use crate::errors::{MinuteSyncError, Result};
use crate::impl_domain_enum_conversions;
use crate::types::formats::hhmm;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub llm: LlmConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Reject configurations the pipeline cannot start with.
    ///
    /// # Errors
    /// Returns `MinuteSyncError::Config` for a missing LLM key, an unknown
    /// timezone or a zero attempt count.
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key.trim().is_empty() {
            return Err(MinuteSyncError::Config(format!(
                "missing API key for the {} analysis service",
                self.llm.provider
            )));
        }
        if self.llm.max_attempts == 0 {
            return Err(MinuteSyncError::Config("llm.max_attempts must be at least 1".into()));
        }
        self.sync.tz()?;
        Ok(())
    }

    /// Sync is only possible with scheduling-service credentials.
    pub fn sync_enabled(&self) -> bool {
        self.scheduler.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Which LLM service performs the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Gemini,
    OpenAi,
}

impl_domain_enum_conversions!(LlmProvider {
    Gemini => "gemini",
    OpenAi => "openai",
});

impl LlmProvider {
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.5-flash",
            Self::OpenAi => "gpt-4o-mini",
        }
    }
}

/// LLM analysis service settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,
    pub api_key: String,
    /// Defaults to the provider's model when absent
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
    /// Override the service endpoint (proxies, tests)
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
}

impl LlmConfig {
    pub fn new(provider: LlmProvider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            model: None,
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout(),
            base_url: None,
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or_else(|| self.provider.default_model())
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model", &self.model())
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("base_url", &self.base_url)
            .field("max_attempts", &self.max_attempts)
            .field("initial_backoff_ms", &self.initial_backoff_ms)
            .finish()
    }
}

fn default_temperature() -> f32 {
    0.2
}

fn default_llm_timeout() -> u64 {
    LLM_TIMEOUT_SECS
}

fn default_max_attempts() -> u32 {
    ANALYSIS_MAX_ATTEMPTS
}

fn default_initial_backoff() -> u64 {
    ANALYSIS_INITIAL_BACKOFF_MS
}

/// Scheduling-service API dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerApiVersion {
    /// API key as a query parameter, `{"event_types": [...]}` envelopes
    V1,
    /// Bearer token, `/api/v2/...` paths, `{"data": ...}` envelopes
    #[default]
    V2,
}

impl_domain_enum_conversions!(SchedulerApiVersion {
    V1 => "v1",
    V2 => "v2",
});

/// Scheduling service settings
#[derive(Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_scheduler_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_version: SchedulerApiVersion,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_scheduler_timeout")]
    pub timeout_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_scheduler_url(),
            api_version: SchedulerApiVersion::default(),
            user_id: None,
            timeout_secs: default_scheduler_timeout(),
        }
    }
}

impl fmt::Debug for SchedulerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchedulerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("user_id", &self.user_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_scheduler_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_scheduler_timeout() -> u64 {
    SCHEDULER_TIMEOUT_SECS
}

/// Date/time policy and booking identity used by the sync engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// IANA timezone every booking is localized to
    pub timezone: String,
    #[serde(with = "hhmm")]
    pub task_default_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub meeting_default_time: NaiveTime,
    pub task_default_offset_days: i64,
    pub meeting_default_offset_days: i64,
    pub default_duration_minutes: u32,
    pub attendee_name: String,
    pub attendee_email: String,
    pub language: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            task_default_time: NaiveTime::from_hms_opt(DEFAULT_TASK_HOUR, 0, 0)
                .unwrap_or(NaiveTime::MIN),
            meeting_default_time: NaiveTime::from_hms_opt(DEFAULT_MEETING_HOUR, 0, 0)
                .unwrap_or(NaiveTime::MIN),
            task_default_offset_days: DEFAULT_TASK_OFFSET_DAYS,
            meeting_default_offset_days: DEFAULT_MEETING_OFFSET_DAYS,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            attendee_name: SYSTEM_ATTENDEE_NAME.to_string(),
            attendee_email: SYSTEM_ATTENDEE_EMAIL.to_string(),
            language: DEFAULT_BOOKING_LANGUAGE.to_string(),
        }
    }
}

impl SyncSettings {
    /// Resolve the configured timezone.
    ///
    /// # Errors
    /// Returns `MinuteSyncError::Config` for names chrono-tz does not know.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| MinuteSyncError::Config(format!("unknown timezone: {}", self.timezone)))
    }
}

/// File locations for the state store and the notes inbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub state_path: PathBuf,
    pub backup_dir: PathBuf,
    pub backup_interval_minutes: u64,
    pub input_dir: PathBuf,
    pub processed_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("data/state.json"),
            backup_dir: PathBuf::from("data/backups"),
            backup_interval_minutes: BACKUP_INTERVAL_MINUTES,
            input_dir: PathBuf::from("input"),
            processed_dir: PathBuf::from("processed"),
        }
    }
}

/// HTTP surface settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5000 }
    }
}
