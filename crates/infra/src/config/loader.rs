//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. An explicitly given file always wins
//! 2. Otherwise, attempts to load from environment variables
//! 3. If the LLM key is missing there, falls back to a probed file
//! 4. Supports JSON and TOML formats
//!
//! Call `dotenvy::dotenv()` before loading to pick up a `.env` file.
//!
//! ## Environment Variables
//! Each setting reads `MINUTESYNC_*` first, then the conventional alias.
//! - `MINUTESYNC_LLM_PROVIDER`: `gemini` (default) or `openai`
//! - `MINUTESYNC_LLM_API_KEY` / `GEMINI_API_KEY` / `OPENAI_API_KEY`: LLM key (required)
//! - `MINUTESYNC_LLM_MODEL`, `MINUTESYNC_LLM_TEMPERATURE`, `MINUTESYNC_LLM_TIMEOUT_SECS`,
//!   `MINUTESYNC_LLM_BASE_URL`, `MINUTESYNC_LLM_MAX_ATTEMPTS`,
//!   `MINUTESYNC_LLM_INITIAL_BACKOFF_MS`
//! - `MINUTESYNC_SCHEDULER_API_KEY` / `CALCOM_API_KEY`: enables sync when set
//! - `MINUTESYNC_SCHEDULER_BASE_URL` / `CALCOM_BASE_URL`
//! - `MINUTESYNC_SCHEDULER_API_VERSION`: `v1` or `v2` (default)
//! - `MINUTESYNC_SCHEDULER_USER_ID` / `CALCOM_USER_ID`
//! - `MINUTESYNC_SCHEDULER_TIMEOUT_SECS`
//! - `MINUTESYNC_TIMEZONE` / `TIMEZONE`: IANA name, default `Asia/Seoul`
//! - `MINUTESYNC_TASK_DEFAULT_TIME`, `MINUTESYNC_MEETING_DEFAULT_TIME`: `HH:MM`
//! - `MINUTESYNC_STATE_PATH`, `MINUTESYNC_BACKUP_DIR`, `MINUTESYNC_INPUT_DIR`,
//!   `MINUTESYNC_PROCESSED_DIR`, `MINUTESYNC_BACKUP_INTERVAL_MINUTES`
//! - `MINUTESYNC_HOST`, `MINUTESYNC_PORT` / `PORT`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./minutesync.{json,toml}` then `./config.{json,toml}` (working directory)
//! 2. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use minutesync_domain::types::parse_time;
use minutesync_domain::{
    AppConfig, LlmConfig, LlmProvider, MinuteSyncError, Result, SchedulerConfig, ServerConfig,
    StorageConfig, SyncSettings,
};

const FILE_NAMES: &[&str] = &["minutesync.json", "minutesync.toml", "config.json", "config.toml"];

/// Load and validate configuration.
///
/// `explicit` (from `--config`) skips the environment entirely.
///
/// # Errors
/// Returns `MinuteSyncError::Config` if no source yields a complete, valid
/// configuration.
pub fn load(explicit: Option<PathBuf>) -> Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_from_file(Some(path))?,
        None => match read_env()? {
            Some(config) => {
                tracing::info!("Configuration loaded from environment variables");
                config
            }
            None => {
                tracing::debug!("No LLM API key in the environment, trying file");
                load_from_file(None)?
            }
        },
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only the LLM API key is required; everything else has a default.
///
/// # Errors
/// Returns `MinuteSyncError::Config` if the key is missing or a value cannot
/// be parsed.
pub fn load_from_env() -> Result<AppConfig> {
    match read_env()? {
        Some(config) => Ok(config),
        None => Err(MinuteSyncError::Config(format!(
            "Missing required environment variable: {}",
            key_names(env_provider()?).join(" or ")
        ))),
    }
}

fn env_provider() -> Result<LlmProvider> {
    match env_opt(&["MINUTESYNC_LLM_PROVIDER"]) {
        Some(raw) => raw.parse::<LlmProvider>().map_err(MinuteSyncError::Config),
        None if env_opt(&["GEMINI_API_KEY"]).is_none()
            && env_opt(&["OPENAI_API_KEY"]).is_some() =>
        {
            Ok(LlmProvider::OpenAi)
        }
        None => Ok(LlmProvider::Gemini),
    }
}

fn key_names(provider: LlmProvider) -> [&'static str; 2] {
    match provider {
        LlmProvider::Gemini => ["MINUTESYNC_LLM_API_KEY", "GEMINI_API_KEY"],
        LlmProvider::OpenAi => ["MINUTESYNC_LLM_API_KEY", "OPENAI_API_KEY"],
    }
}

/// `Ok(None)` when no LLM key is set. Any variable that is set must parse.
fn read_env() -> Result<Option<AppConfig>> {
    let provider = env_provider()?;
    let Some(api_key) = env_opt(&key_names(provider)) else {
        return Ok(None);
    };

    let mut llm = LlmConfig::new(provider, api_key);
    llm.model = env_opt(&["MINUTESYNC_LLM_MODEL"]);
    llm.base_url = env_opt(&["MINUTESYNC_LLM_BASE_URL"]);
    llm.temperature = env_parse(&["MINUTESYNC_LLM_TEMPERATURE"], llm.temperature)?;
    llm.timeout_secs = env_parse(&["MINUTESYNC_LLM_TIMEOUT_SECS"], llm.timeout_secs)?;
    llm.max_attempts = env_parse(&["MINUTESYNC_LLM_MAX_ATTEMPTS"], llm.max_attempts)?;
    llm.initial_backoff_ms =
        env_parse(&["MINUTESYNC_LLM_INITIAL_BACKOFF_MS"], llm.initial_backoff_ms)?;

    let defaults = SchedulerConfig::default();
    let scheduler = SchedulerConfig {
        api_key: env_opt(&["MINUTESYNC_SCHEDULER_API_KEY", "CALCOM_API_KEY"]),
        base_url: env_opt(&["MINUTESYNC_SCHEDULER_BASE_URL", "CALCOM_BASE_URL"])
            .unwrap_or(defaults.base_url),
        api_version: env_parse(&["MINUTESYNC_SCHEDULER_API_VERSION"], defaults.api_version)?,
        user_id: env_opt(&["MINUTESYNC_SCHEDULER_USER_ID", "CALCOM_USER_ID"]),
        timeout_secs: env_parse(&["MINUTESYNC_SCHEDULER_TIMEOUT_SECS"], defaults.timeout_secs)?,
    };

    let defaults = SyncSettings::default();
    let sync = SyncSettings {
        timezone: env_opt(&["MINUTESYNC_TIMEZONE", "TIMEZONE"]).unwrap_or(defaults.timezone),
        task_default_time: env_time("MINUTESYNC_TASK_DEFAULT_TIME", defaults.task_default_time)?,
        meeting_default_time: env_time(
            "MINUTESYNC_MEETING_DEFAULT_TIME",
            defaults.meeting_default_time,
        )?,
        ..defaults
    };

    let defaults = StorageConfig::default();
    let storage = StorageConfig {
        state_path: env_opt(&["MINUTESYNC_STATE_PATH"]).map_or(defaults.state_path, PathBuf::from),
        backup_dir: env_opt(&["MINUTESYNC_BACKUP_DIR"]).map_or(defaults.backup_dir, PathBuf::from),
        backup_interval_minutes: env_parse(
            &["MINUTESYNC_BACKUP_INTERVAL_MINUTES"],
            defaults.backup_interval_minutes,
        )?,
        input_dir: env_opt(&["MINUTESYNC_INPUT_DIR"]).map_or(defaults.input_dir, PathBuf::from),
        processed_dir: env_opt(&["MINUTESYNC_PROCESSED_DIR"])
            .map_or(defaults.processed_dir, PathBuf::from),
    };

    let defaults = ServerConfig::default();
    let server = ServerConfig {
        host: env_opt(&["MINUTESYNC_HOST"]).unwrap_or(defaults.host),
        port: env_parse(&["MINUTESYNC_PORT", "PORT"], defaults.port)?,
    };

    Ok(Some(AppConfig { llm, scheduler, sync, storage, server }))
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `MinuteSyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MinuteSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MinuteSyncError::Config(
                "No LLM API key in the environment and no config file found".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MinuteSyncError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MinuteSyncError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MinuteSyncError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(MinuteSyncError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the working directory, then the executable's directory, for a
/// config file. Returns the first one that exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }
    probe_in(&dirs)
}

fn probe_in(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// First non-empty value among `keys`.
fn env_opt(keys: &[&str]) -> Option<String> {
    env_named(keys).map(|(_, value)| value)
}

/// First non-empty value among `keys`, with the key it came from.
fn env_named(keys: &[&str]) -> Option<(String, String)> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
        .map(|(key, value)| (key, value.trim().to_string()))
        .find(|(_, value)| !value.is_empty())
}

fn env_parse<T>(keys: &[&str], default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_named(keys) {
        Some((key, raw)) => raw
            .parse::<T>()
            .map_err(|e| MinuteSyncError::Config(format!("Invalid value for {key}: {e}"))),
        None => Ok(default),
    }
}

fn env_time(key: &str, default: chrono::NaiveTime) -> Result<chrono::NaiveTime> {
    match env_opt(&[key]) {
        Some(raw) => parse_time(&raw)
            .ok_or_else(|| MinuteSyncError::Config(format!("Invalid time for {key}: {raw}"))),
        None => Ok(default),
    }
}
