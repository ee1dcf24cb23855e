//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use minutesync_core::{
    Clock, CompletionBackend, MeetingPipeline, PipelineOutcome, RetryPolicy, SchedulingService,
    SyncEngine, SystemClock, TextAnalysisClient,
};
use minutesync_domain::{AppConfig, LlmConfig, LlmProvider, Result, SchedulerConfig};
use minutesync_infra::{CalcomClient, GeminiClient, HttpClient, JsonStateStore, OpenAIClient};
use tracing::{info, warn};

use crate::utils::health::HealthReport;

/// Application context - holds the pipeline and the state store
pub struct AppContext {
    pub config: AppConfig,
    pub clock: Arc<dyn Clock>,
    pub pipeline: Arc<MeetingPipeline>,
    pub store: Arc<JsonStateStore>,
}

impl AppContext {
    /// Wire the configured LLM backend, the scheduling adapter (when a key
    /// is present) and the state store.
    ///
    /// # Errors
    /// Fails on an invalid timezone, an unusable scheduler user id or an
    /// HTTP client that cannot be constructed.
    pub fn new(config: AppConfig) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let timezone = config.sync.tz()?;

        let backend = create_completion_backend(&config.llm)?;
        let analyzer = TextAnalysisClient::new(backend, Arc::clone(&clock), timezone)
            .with_retry_policy(RetryPolicy::from_config(&config.llm));

        let sync = if config.sync_enabled() {
            let service = create_scheduling_service(&config.scheduler)?;
            Some(SyncEngine::new(service, Arc::clone(&clock), config.sync.clone())?)
        } else {
            warn!("no scheduling API key configured, calendar sync is disabled");
            None
        };

        let store = JsonStateStore::from_config(&config.storage, Arc::clone(&clock));
        info!(
            provider = %config.llm.provider,
            model = config.llm.model(),
            sync_enabled = sync.is_some(),
            timezone = %config.sync.timezone,
            "application context initialized"
        );

        Ok(Self::from_parts(config, clock, MeetingPipeline::new(analyzer, sync), store))
    }

    /// Assemble a context from prebuilt parts.
    pub fn from_parts(
        config: AppConfig,
        clock: Arc<dyn Clock>,
        pipeline: MeetingPipeline,
        store: JsonStateStore,
    ) -> Self {
        Self { config, clock, pipeline: Arc::new(pipeline), store: Arc::new(store) }
    }

    /// Run the pipeline and record the notes and synced bookings.
    ///
    /// A failed state write is logged; the outcome is still returned.
    pub async fn process(&self, notes: &str, auto_sync: bool) -> Result<PipelineOutcome> {
        let outcome = self.pipeline.process(notes, auto_sync).await?;

        let synced = outcome.sync_report.as_ref().map(|r| r.synced.as_slice()).unwrap_or_default();
        if let Err(err) = self.store.record_run(notes, synced).await {
            warn!(error = %err, path = %self.store.path().display(), "failed to save state");
        }

        Ok(outcome)
    }

    pub fn health(&self) -> HealthReport {
        HealthReport::new(
            !self.config.llm.api_key.trim().is_empty(),
            self.pipeline.sync_enabled(),
        )
    }
}

fn create_completion_backend(config: &LlmConfig) -> Result<Arc<dyn CompletionBackend>> {
    let http_client =
        HttpClient::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

    let backend: Arc<dyn CompletionBackend> = match config.provider {
        LlmProvider::Gemini => {
            let mut client = GeminiClient::new(&config.api_key, http_client)
                .with_model(config.model())
                .with_temperature(config.temperature);
            if let Some(base) = &config.base_url {
                client = client.with_api_base(base);
            }
            Arc::new(client)
        }
        LlmProvider::OpenAi => {
            let mut client = OpenAIClient::new(&config.api_key, http_client)
                .with_model(config.model())
                .with_temperature(config.temperature);
            if let Some(base) = &config.base_url {
                client = client
                    .with_api_url(format!("{}/v1/chat/completions", base.trim_end_matches('/')));
            }
            Arc::new(client)
        }
    };
    Ok(backend)
}

fn create_scheduling_service(config: &SchedulerConfig) -> Result<Arc<dyn SchedulingService>> {
    let http_client =
        HttpClient::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
    Ok(Arc::new(CalcomClient::from_config(config, http_client)?))
}

#[cfg(test)]
mod tests {
    use minutesync_domain::{LlmConfig, MinuteSyncError};
    use tempfile::TempDir;

    use super::*;

    fn config(dir: &TempDir) -> AppConfig {
        let mut config: AppConfig = serde_json::from_value(serde_json::json!({
            "llm": {"api_key": "test-key"}
        }))
        .unwrap();
        config.storage.state_path = dir.path().join("state.json");
        config.storage.backup_dir = dir.path().join("backups");
        config
    }

    #[test]
    fn sync_is_disabled_without_scheduler_key() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::new(config(&dir)).unwrap();

        let health = ctx.health();
        assert!(health.llm_configured);
        assert!(!health.scheduler_configured);
        assert!(!ctx.pipeline.sync_enabled());
    }

    #[test]
    fn scheduler_key_enables_sync() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.scheduler.api_key = Some("cal_live".into());
        config.llm = LlmConfig::new(LlmProvider::OpenAi, "sk");

        let ctx = AppContext::new(config).unwrap();
        assert!(ctx.health().scheduler_configured);
    }

    #[test]
    fn bad_scheduler_user_id_fails_startup() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.scheduler.api_key = Some("cal_live".into());
        config.scheduler.user_id = Some("me".into());

        assert!(matches!(AppContext::new(config), Err(MinuteSyncError::Config(_))));
    }
}
