//! JSON file state store
//!
//! One JSON document, `{"meetingNotes": "...", "events": [...]}`, rewritten
//! in full on every save. Writes go to a sibling temp file that is synced and
//! renamed over the target. Before a save replaces an existing file, that file
//! is copied into the backup directory, at most once per backup interval.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use minutesync_core::Clock;
use minutesync_domain::{MinuteSyncError, Result, StorageConfig, SyncedBooking};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::errors::InfraError;

const BACKUP_STAMP: &str = "%Y%m%d_%H%M%S";

/// Persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredState {
    pub meeting_notes: String,
    pub events: Vec<SyncedBooking>,
}

pub struct JsonStateStore {
    path: PathBuf,
    backup_dir: PathBuf,
    backup_interval: Duration,
    clock: Arc<dyn Clock>,
    // Serializes read-modify-write cycles from concurrent requests.
    write_lock: Mutex<()>,
}

impl JsonStateStore {
    pub fn new(
        path: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
        backup_interval: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            path: path.into(),
            backup_dir: backup_dir.into(),
            backup_interval,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &StorageConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            &config.state_path,
            &config.backup_dir,
            i64::try_from(config.backup_interval_minutes)
                .ok()
                .and_then(Duration::try_minutes)
                .unwrap_or(Duration::MAX),
            clock,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored state. A missing file yields the empty state.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<StoredState> {
        if !fs::try_exists(&self.path).await.map_err(InfraError::from)? {
            debug!("State file does not exist yet");
            return Ok(StoredState::default());
        }

        let data = fs::read(&self.path).await.map_err(InfraError::from)?;
        let state: StoredState = serde_json::from_slice(&data).map_err(InfraError::from)?;
        debug!(events = state.events.len(), "Loaded state");
        Ok(state)
    }

    /// Replace the stored state.
    pub async fn save(&self, state: &StoredState) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write(state).await
    }

    /// Store the notes of the latest run and append its synced bookings.
    #[instrument(skip(self, notes, synced), fields(new_events = synced.len()))]
    pub async fn record_run(&self, notes: &str, synced: &[SyncedBooking]) -> Result<StoredState> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.load().await?;
        state.meeting_notes = notes.to_string();
        state.events.extend_from_slice(synced);
        self.write(&state).await?;
        Ok(state)
    }

    async fn write(&self, state: &StoredState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }

        if let Err(e) = self.backup_if_due().await {
            // A failed backup must not lose the new state.
            warn!(error = %e, "State backup failed");
        }

        let data = serde_json::to_vec_pretty(state).map_err(InfraError::from)?;
        let temp_path = self.path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path).await.map_err(InfraError::from)?;
        file.write_all(&data).await.map_err(InfraError::from)?;
        file.sync_all().await.map_err(InfraError::from)?;
        drop(file);

        fs::rename(&temp_path, &self.path).await.map_err(InfraError::from)?;
        info!(path = %self.path.display(), events = state.events.len(), "State saved");
        Ok(())
    }

    /// Copy the current file into the backup directory when the newest
    /// backup is at least one interval old. Returns the new backup's path.
    async fn backup_if_due(&self) -> Result<Option<PathBuf>> {
        if !fs::try_exists(&self.path).await.map_err(InfraError::from)? {
            return Ok(None);
        }

        let now = self.clock.now();
        if let Some(latest) = self.latest_backup().await? {
            if now - latest < self.backup_interval {
                return Ok(None);
            }
        }

        fs::create_dir_all(&self.backup_dir).await.map_err(InfraError::from)?;
        let backup_path = self.backup_dir.join(format!(
            "{}_{}.json",
            self.file_stem(),
            now.format(BACKUP_STAMP)
        ));
        fs::copy(&self.path, &backup_path).await.map_err(InfraError::from)?;
        info!(backup = %backup_path.display(), "Created state backup");
        Ok(Some(backup_path))
    }

    /// Timestamp of the newest backup, read from the file names.
    async fn latest_backup(&self) -> Result<Option<DateTime<Utc>>> {
        let mut entries = match fs::read_dir(&self.backup_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(MinuteSyncError::from(InfraError::from(e))),
        };

        let prefix = format!("{}_", self.file_stem());
        let mut latest = None;
        while let Some(entry) = entries.next_entry().await.map_err(InfraError::from)? {
            let name = entry.file_name();
            let stamp = name
                .to_str()
                .and_then(|n| n.strip_prefix(&prefix))
                .and_then(|n| n.strip_suffix(".json"))
                .and_then(|s| NaiveDateTime::parse_from_str(s, BACKUP_STAMP).ok())
                .map(|naive| naive.and_utc());
            if stamp > latest {
                latest = stamp;
            }
        }
        Ok(latest)
    }

    fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map_or_else(|| "state".to_string(), |s| s.to_string_lossy().into_owned())
    }
}
