//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Analysis fallbacks
pub const UNTITLED: &str = "Untitled";
pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const ANALYSIS_FAILED_PREFIX: &str = "Analysis failed";
pub const RATE_LIMIT_ERROR: &str = "Rate Limit Exceeded";
pub const RATE_LIMIT_SUMMARY: &str =
    "Analysis failed: API usage limit exceeded. Please try again later. (Rate Limit Exceeded)";
pub const PARSE_FAILURE_ERROR: &str = "JSON Parse Error";
pub const PARSE_FAILURE_SUMMARY: &str = "Analysis failed: JSON parse error";

// Retry policy for the analysis service
pub const ANALYSIS_MAX_ATTEMPTS: u32 = 3;
pub const ANALYSIS_INITIAL_BACKOFF_MS: u64 = 2_000;

// Short notes used to check that the analysis service answers
pub const CONNECTIVITY_SAMPLE_NOTES: &str = "회의: 내일 오후 2시 프로젝트 미팅";

// Sync defaults
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";
pub const DEFAULT_TASK_HOUR: u32 = 9;
pub const DEFAULT_MEETING_HOUR: u32 = 14;
pub const DEFAULT_TASK_OFFSET_DAYS: i64 = 1;
pub const DEFAULT_MEETING_OFFSET_DAYS: i64 = 7;
pub const SYSTEM_ATTENDEE_NAME: &str = "System";
pub const SYSTEM_ATTENDEE_EMAIL: &str = "system@example.com";
pub const DEFAULT_BOOKING_LANGUAGE: &str = "ko";
pub const TODO_MARKER: &str = "[TODO]";

// Canonical textual forms
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

// Network timeouts (seconds)
pub const SCHEDULER_TIMEOUT_SECS: u64 = 10;
pub const LLM_TIMEOUT_SECS: u64 = 60;

// Storage
pub const BACKUP_INTERVAL_MINUTES: u64 = 10;
