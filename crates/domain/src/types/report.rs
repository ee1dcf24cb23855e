//! Synchronization report

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::scheduling::EventCategory;

/// One booking successfully created during a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedBooking {
    pub kind: EventCategory,
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub event_type_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<i64>,
}

/// Outcome of one sync run: one message per source item, in source order,
/// tasks first. Failed items land in `errors`; the run never aborts early.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncReport {
    pub tasks_created: Vec<String>,
    pub events_created: Vec<String>,
    pub errors: Vec<String>,
    pub synced: Vec<SyncedBooking>,
}

impl SyncReport {
    pub fn total_created(&self) -> usize {
        self.tasks_created.len() + self.events_created.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Total number of outcomes recorded, successes and failures alike.
    pub fn outcomes(&self) -> usize {
        self.total_created() + self.errors.len()
    }
}
