//! Analyze-then-sync pipeline shared by the CLI and the HTTP surface

use minutesync_domain::constants::CONNECTIVITY_SAMPLE_NOTES;
use minutesync_domain::{AnalysisRecord, ExternalEventType, MinuteSyncError, Result, SyncReport};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::analysis::TextAnalysisClient;
use crate::sync::SyncEngine;

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub analysis: AnalysisRecord,
    /// `None` when sync was not requested, not configured, or skipped
    /// because the analysis degraded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_report: Option<SyncReport>,
}

pub struct MeetingPipeline {
    analyzer: TextAnalysisClient,
    sync: Option<SyncEngine>,
}

impl MeetingPipeline {
    /// `sync` is `None` when no scheduling service is configured.
    pub fn new(analyzer: TextAnalysisClient, sync: Option<SyncEngine>) -> Self {
        Self { analyzer, sync }
    }

    pub fn sync_enabled(&self) -> bool {
        self.sync.is_some()
    }

    /// Analyze `text` and, when `auto_sync` is set and a scheduling service
    /// is configured, book its tasks and meetings.
    ///
    /// Only empty input is an error. Analysis and sync failures are carried
    /// inside the outcome.
    #[instrument(skip(self, text), fields(auto_sync))]
    pub async fn process(&self, text: &str, auto_sync: bool) -> Result<PipelineOutcome> {
        if text.trim().is_empty() {
            return Err(MinuteSyncError::InvalidInput("meeting notes are empty".into()));
        }

        let analysis = self.analyzer.analyze(text).await;

        let sync_report = match (&self.sync, auto_sync) {
            (Some(_), true) if analysis.is_degraded() => {
                warn!("analysis degraded, skipping sync");
                None
            }
            (Some(engine), true) => Some(engine.sync(&analysis).await),
            (None, true) => {
                info!("no scheduling service configured, skipping sync");
                None
            }
            (_, false) => None,
        };

        Ok(PipelineOutcome { analysis, sync_report })
    }

    /// Send a short sample through the analyzer. Unlike [`Self::process`],
    /// a failed analysis is an error here instead of a degraded record.
    #[instrument(skip(self))]
    pub async fn check_analyzer(&self) -> Result<AnalysisRecord> {
        Ok(self.analyzer.try_analyze(CONNECTIVITY_SAMPLE_NOTES).await?)
    }

    /// List the scheduling service's event types; `None` when no service is
    /// configured.
    #[instrument(skip(self))]
    pub async fn check_scheduler(&self) -> Option<Result<Vec<ExternalEventType>>> {
        match &self.sync {
            Some(engine) => Some(engine.event_types().await),
            None => None,
        }
    }
}
