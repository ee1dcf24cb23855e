//! `minutesync analyze <FILE>`

use std::path::Path;

use minutesync_core::{format_analysis, format_report, PipelineOutcome};
use minutesync_domain::{MinuteSyncError, Result};
use tracing::info;

use crate::context::AppContext;

/// Analyze one notes file, optionally syncing it.
///
/// # Errors
/// Fails when the file cannot be read or is empty.
pub async fn analyze_file(ctx: &AppContext, path: &Path, auto_sync: bool) -> Result<PipelineOutcome> {
    let notes = tokio::fs::read_to_string(path).await.map_err(|e| {
        MinuteSyncError::NotFound(format!("cannot read {}: {e}", path.display()))
    })?;

    info!(file = %path.display(), auto_sync, "analyzing notes file");
    ctx.process(&notes, auto_sync).await
}

/// Formatted analysis followed by the sync report, if any.
pub fn render_outcome(outcome: &PipelineOutcome) -> String {
    let mut out = format_analysis(&outcome.analysis);
    if let Some(report) = &outcome.sync_report {
        out.push('\n');
        out.push_str(&format_report(report));
    }
    out
}
