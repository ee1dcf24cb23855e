//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveTime;
use minutesync_domain::{LlmProvider, MinuteSyncError, SchedulerApiVersion};
use minutesync_infra::config;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "llm": {
            "provider": "gemini",
            "api_key": "gemini-test-key",
            "temperature": 0.1,
            "max_attempts": 5
        },
        "scheduler": {
            "api_key": "cal_live_abc",
            "base_url": "https://cal.example.com/",
            "api_version": "v1",
            "user_id": "42"
        },
        "sync": {
            "timezone": "America/New_York",
            "task_default_time": "10:15",
            "default_duration_minutes": 45
        },
        "storage": {
            "state_path": "/tmp/minutesync/state.json",
            "backup_interval_minutes": 30
        }
    }"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(json_content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("json");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let config = config::load(Some(path.clone())).expect("valid JSON config");

    assert_eq!(config.llm.provider, LlmProvider::Gemini);
    assert_eq!(config.llm.api_key, "gemini-test-key");
    assert_eq!(config.llm.max_attempts, 5);
    assert_eq!(config.llm.initial_backoff_ms, 2000);

    assert!(config.sync_enabled());
    assert_eq!(config.scheduler.api_version, SchedulerApiVersion::V1);
    assert_eq!(config.scheduler.user_id.as_deref(), Some("42"));

    assert_eq!(config.sync.timezone, "America/New_York");
    assert_eq!(config.sync.task_default_time, NaiveTime::from_hms_opt(10, 15, 0).unwrap());
    assert_eq!(config.sync.meeting_default_time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
    assert_eq!(config.sync.default_duration_minutes, 45);

    assert_eq!(config.storage.state_path, PathBuf::from("/tmp/minutesync/state.json"));
    assert_eq!(config.storage.backup_interval_minutes, 30);
    assert_eq!(config.storage.processed_dir, PathBuf::from("processed"));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("minutesync.toml");
    std::fs::write(
        &path,
        r#"
[llm]
provider = "openai"
api_key = "sk-test"
model = "gpt-4o"

[server]
host = "127.0.0.1"
port = 8088
"#,
    )
    .expect("write config");

    let config = config::load(Some(path)).expect("valid TOML config");

    assert_eq!(config.llm.provider, LlmProvider::OpenAi);
    assert_eq!(config.llm.model(), "gpt-4o");
    assert!(!config.sync_enabled(), "no scheduler key means sync is off");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8088);
    assert_eq!(config.sync.timezone, "Asia/Seoul");
}

#[test]
fn test_missing_llm_section_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"scheduler": {"api_key": "cal"}}"#).expect("write config");

    let result = config::load_from_file(Some(path));
    assert!(matches!(result, Err(MinuteSyncError::Config(_))));
}

#[test]
fn test_blank_llm_key_fails_validation() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"llm": {"api_key": "   "}}"#).expect("write config");

    assert!(config::load_from_file(Some(path.clone())).is_ok(), "parsing alone succeeds");
    assert!(matches!(config::load(Some(path)), Err(MinuteSyncError::Config(_))));
}

#[test]
fn test_invalid_toml_reports_config_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[llm\napi_key = ").expect("write config");

    let err = config::load_from_file(Some(path)).expect_err("broken TOML");
    assert!(matches!(err, MinuteSyncError::Config(ref m) if m.contains("TOML")));
}
