//! `minutesync run`: batch processing of the input directory
//!
//! Every `*.txt` file in the input directory is analyzed, oldest first. The
//! analysis is written next to the moved source in the processed directory:
//!
//! ```text
//! input/standup.txt
//!   -> processed/standup_20261017_100000_analysis.json
//!   -> processed/standup_20261017_100000.txt
//! ```
//!
//! Empty files stay in place and are reported as skipped.

use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use minutesync_core::PipelineOutcome;
use minutesync_domain::{MinuteSyncError, Result};
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::commands::analyze::render_outcome;
use crate::context::AppContext;
use crate::utils::logging::error_label;

const FILE_STAMP: &str = "%Y%m%d_%H%M%S";

/// Where one processed file ended up.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedFile {
    pub source: PathBuf,
    pub analysis_path: PathBuf,
    pub moved_to: PathBuf,
    pub outcome: PipelineOutcome,
}

/// Pending `*.txt` files, oldest modification time first.
pub async fn pending_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = match fs::read_dir(input_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %input_dir.display(), "input directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(MinuteSyncError::Storage(format!("cannot list {}: {e}", input_dir.display()))),
    };

    let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| MinuteSyncError::Storage(format!("cannot list {}: {e}", input_dir.display())))?
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let Ok(metadata) = entry.metadata().await else { continue };
        if metadata.is_file() {
            files.push((metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH), path));
        }
    }

    files.sort();
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Analyze one inbox file and move it into the processed directory.
///
/// Returns `Ok(None)` for an empty file, which is left where it is.
#[instrument(skip(ctx), fields(file = %path.display()))]
pub async fn process_file(
    ctx: &AppContext,
    path: &Path,
    auto_sync: bool,
) -> Result<Option<ProcessedFile>> {
    let notes = fs::read_to_string(path)
        .await
        .map_err(|e| MinuteSyncError::Storage(format!("cannot read {}: {e}", path.display())))?;
    if notes.trim().is_empty() {
        warn!("file is empty, skipping");
        return Ok(None);
    }

    let outcome = ctx.process(&notes, auto_sync).await?;

    let processed_dir = &ctx.config.storage.processed_dir;
    fs::create_dir_all(processed_dir)
        .await
        .map_err(|e| MinuteSyncError::Storage(format!("cannot create {}: {e}", processed_dir.display())))?;

    let timezone = ctx.config.sync.tz()?;
    let stamp = ctx.clock.now().with_timezone(&timezone).format(FILE_STAMP).to_string();
    let stem = path.file_stem().map_or_else(|| "notes".into(), |s| s.to_string_lossy());

    let analysis_path = processed_dir.join(format!("{stem}_{stamp}_analysis.json"));
    let json = serde_json::to_vec_pretty(&outcome.analysis)
        .map_err(|e| MinuteSyncError::Internal(format!("cannot serialize analysis: {e}")))?;
    fs::write(&analysis_path, json)
        .await
        .map_err(|e| MinuteSyncError::Storage(format!("cannot write {}: {e}", analysis_path.display())))?;

    let moved_to = processed_dir.join(format!("{stem}_{stamp}.txt"));
    move_file(path, &moved_to).await?;
    info!(analysis = %analysis_path.display(), moved_to = %moved_to.display(), "file processed");

    Ok(Some(ProcessedFile { source: path.to_path_buf(), analysis_path, moved_to, outcome }))
}

/// Process everything currently pending. Per-file failures are logged and
/// do not stop the batch. Returns the files that were processed.
pub async fn run_once(ctx: &AppContext, auto_sync: bool) -> Result<Vec<ProcessedFile>> {
    let pending = pending_files(&ctx.config.storage.input_dir).await?;
    if pending.is_empty() {
        println!(
            "No files to process. Add meeting notes as .txt files to {}",
            ctx.config.storage.input_dir.display()
        );
        return Ok(Vec::new());
    }

    println!("Files to process: {}", pending.len());
    let mut processed = Vec::new();
    for path in &pending {
        if let Some(done) = process_and_print(ctx, path, auto_sync).await {
            processed.push(done);
        }
    }
    println!("Done: {} file(s) processed", processed.len());
    Ok(processed)
}

/// Poll the input directory until Ctrl-C. A file is attempted once per
/// watch session, even when processing it failed.
pub async fn watch(ctx: &AppContext, auto_sync: bool, interval: Duration) -> Result<()> {
    watch_until(ctx, auto_sync, interval, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// [`watch`] with an arbitrary stop signal.
///
/// `shutdown` lives across iterations, so a signal that fires while a file
/// is being processed stops the loop once that file is done.
pub async fn watch_until<F>(
    ctx: &AppContext,
    auto_sync: bool,
    interval: Duration,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    println!(
        "Watching {} every {}s, press Ctrl-C to stop",
        ctx.config.storage.input_dir.display(),
        interval.as_secs()
    );

    tokio::pin!(shutdown);
    let mut attempted: HashSet<PathBuf> = HashSet::new();
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => {
                info!("watch mode stopped");
                return Ok(());
            }
            _ = ticker.tick() => {
                for path in pending_files(&ctx.config.storage.input_dir).await? {
                    if attempted.insert(path.clone()) {
                        process_and_print(ctx, &path, auto_sync).await;
                    }
                }
            }
        }
    }
}

async fn process_and_print(ctx: &AppContext, path: &Path, auto_sync: bool) -> Option<ProcessedFile> {
    println!("Processing {}", path.display());
    match process_file(ctx, path, auto_sync).await {
        Ok(Some(done)) => {
            println!("{}", render_outcome(&done.outcome));
            println!("Saved analysis: {}", done.analysis_path.display());
            Some(done)
        }
        Ok(None) => {
            println!("Skipped empty file: {}", path.display());
            None
        }
        Err(err) => {
            warn!(file = %path.display(), error = %err, kind = error_label(&err), "failed to process file");
            println!("Failed to process {}: {err}", path.display());
            None
        }
    }
}

/// Rename, falling back to copy-and-delete across file systems.
async fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    fs::copy(from, to)
        .await
        .map_err(|e| MinuteSyncError::Storage(format!("cannot move {}: {e}", from.display())))?;
    fs::remove_file(from)
        .await
        .map_err(|e| MinuteSyncError::Storage(format!("cannot remove {}: {e}", from.display())))?;
    Ok(())
}
