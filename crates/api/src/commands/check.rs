//! `minutesync check`

use minutesync_domain::{AnalysisRecord, ExternalEventType, Result};

use crate::context::AppContext;

/// Outcome of probing the configured services.
#[derive(Debug)]
pub struct CheckReport {
    pub llm: Result<AnalysisRecord>,
    /// `None` when no scheduling service is configured
    pub scheduler: Option<Result<Vec<ExternalEventType>>>,
}

impl CheckReport {
    /// An unconfigured scheduler does not fail the check.
    pub fn passed(&self) -> bool {
        self.llm.is_ok() && !matches!(self.scheduler, Some(Err(_)))
    }

    pub fn render(&self) -> String {
        let llm = match &self.llm {
            Ok(record) => format!(
                "LLM: ok ({} todo tasks, {} schedule items from the sample)",
                record.todo_tasks.len(),
                record.schedule_items.len()
            ),
            Err(err) => format!("LLM: FAILED - {err}"),
        };
        let scheduler = match &self.scheduler {
            Some(Ok(types)) => format!("Scheduler: ok ({} event types)", types.len()),
            Some(Err(err)) => format!("Scheduler: FAILED - {err}"),
            None => "Scheduler: not configured".to_string(),
        };
        format!("{llm}\n{scheduler}")
    }
}

/// Send a sample through the analyzer and list the scheduler's event types.
pub async fn check(ctx: &AppContext) -> CheckReport {
    CheckReport {
        llm: ctx.pipeline.check_analyzer().await,
        scheduler: ctx.pipeline.check_scheduler().await,
    }
}
