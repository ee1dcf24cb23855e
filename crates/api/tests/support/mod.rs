//! Shared fixtures: a canned LLM backend and a context rooted in a temp dir.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use minutesync_app::AppContext;
use minutesync_core::{
    Clock, CompletionBackend, CompletionError, FixedClock, MeetingPipeline, TextAnalysisClient,
};
use minutesync_domain::AppConfig;
use minutesync_infra::JsonStateStore;
use tempfile::TempDir;

pub const REPLY: &str = r#"{
  "meeting_title": "Weekly planning",
  "summary": "Budget review and launch prep",
  "completed_tasks": [],
  "todo_tasks": [
    {"title": "Draft budget", "description": "Q4 numbers", "priority": "high", "who": "Mina", "deadline": "2026-10-20"}
  ],
  "schedule_items": [],
  "important_dates": [],
  "participants": ["Mina", "Joon"],
  "key_decisions": ["Launch moves to November"]
}"#;

/// Always answers with the same reply and counts calls.
pub struct CannedBackend {
    reply: String,
    calls: AtomicUsize,
}

impl CannedBackend {
    pub fn new(reply: &str) -> Self {
        Self { reply: reply.to_string(), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for CannedBackend {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "canned"
    }
}

/// 2026-10-17 10:00 in Seoul.
pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 17, 1, 0, 0).unwrap()))
}

/// Context without a scheduling service, storing everything under `dir`.
pub fn context(dir: &TempDir, backend: Arc<dyn CompletionBackend>) -> AppContext {
    let mut config: AppConfig =
        serde_json::from_value(serde_json::json!({"llm": {"api_key": "test-key"}})).unwrap();
    config.storage.state_path = dir.path().join("data/state.json");
    config.storage.backup_dir = dir.path().join("data/backups");
    config.storage.input_dir = dir.path().join("input");
    config.storage.processed_dir = dir.path().join("processed");

    let clock: Arc<dyn Clock> = fixed_clock();
    let analyzer =
        TextAnalysisClient::new(backend, Arc::clone(&clock), config.sync.tz().unwrap());
    let store = JsonStateStore::from_config(&config.storage, Arc::clone(&clock));

    AppContext::from_parts(config, clock, MeetingPipeline::new(analyzer, None), store)
}
