//! Structured meeting analysis
//!
//! [`AnalysisRecord`] is what the text-analysis step produces and what the
//! sync step and the formatter read. A failed analysis still yields a
//! well-formed record (every list empty, `error` set) so downstream code never
//! has to branch on a missing record.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::formats::hhmm;
use crate::constants::{DEFAULT_DURATION_MINUTES, RATE_LIMIT_ERROR, RATE_LIMIT_SUMMARY};
use crate::impl_domain_enum_conversions;

/// Priority of an open task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl_domain_enum_conversions!(Priority {
    High => "high",
    Medium => "medium",
    Low => "low",
});

impl Priority {
    /// Colored indicator used in booking titles and summaries.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::High => "🔴",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }

    /// Parse leniently: anything unrecognized is treated as medium.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

/// Work reported as already done during the meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who: Option<String>,
}

/// An actionable work item extracted from the notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// Source sentence the task was extracted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// A time-and-place-bound event involving several people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

/// A date the meeting called out as significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantDate {
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

/// Structured result of analyzing one set of meeting notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRecord {
    pub meeting_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    /// Markdown narrative
    pub summary: String,
    pub completed_tasks: Vec<CompletedTask>,
    pub todo_tasks: Vec<TodoTask>,
    pub schedule_items: Vec<ScheduleItem>,
    pub important_dates: Vec<ImportantDate>,
    pub participants: Vec<String>,
    pub key_decisions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unparsed service output, kept for diagnostics when parsing failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl AnalysisRecord {
    /// A record carrying only a failure description.
    pub fn degraded(summary: impl Into<String>, error: Option<String>) -> Self {
        Self { summary: summary.into(), error, ..Self::default() }
    }

    /// The record returned once rate-limit retries are exhausted.
    pub fn rate_limited() -> Self {
        Self::degraded(RATE_LIMIT_SUMMARY, Some(RATE_LIMIT_ERROR.to_string()))
    }

    /// Attach the raw service output for diagnostics.
    #[must_use]
    pub fn with_raw_response(mut self, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        self.raw_response = (!raw.is_empty()).then_some(raw);
        self
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some() || self.raw_response.is_some()
    }

    /// Number of items the sync step will try to turn into bookings.
    pub fn syncable_items(&self) -> usize {
        self.todo_tasks.len() + self.schedule_items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_priority_labels_fall_back_to_medium() {
        assert_eq!(Priority::from_label("HIGH"), Priority::High);
        assert_eq!(Priority::from_label("urgent"), Priority::Medium);
        assert_eq!(Priority::Low.glyph(), "🟢");
    }

    #[test]
    fn rate_limited_record_is_empty_but_flagged() {
        let record = AnalysisRecord::rate_limited();
        assert!(record.is_degraded());
        assert_eq!(record.error.as_deref(), Some(RATE_LIMIT_ERROR));
        assert_eq!(record.syncable_items(), 0);
        assert!(record.participants.is_empty());
    }

    #[test]
    fn schedule_item_serializes_time_as_hour_minute() {
        let item = ScheduleItem {
            title: "Weekly sync".into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2026, 10, 20),
            time: NaiveTime::from_hms_opt(14, 0, 0),
            duration_minutes: 30,
            context: None,
        };
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["date"], "2026-10-20");
        assert_eq!(json["time"], "14:00");
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let record: AnalysisRecord =
            serde_json::from_str(r#"{"summary": "short"}"#).expect("deserialize");
        assert_eq!(record.summary, "short");
        assert!(record.todo_tasks.is_empty());
        assert!(record.error.is_none());
        assert!(!record.is_degraded());
    }

    #[test]
    fn schedule_item_duration_defaults_to_an_hour() {
        let item: ScheduleItem = serde_json::from_str(r#"{"title": "Demo"}"#).expect("item");
        assert_eq!(item.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert!(item.time.is_none());
    }
}
