//! Validation of raw model output
//!
//! The model's reply is untyped JSON. It is deserialized into loose `Raw*`
//! mirrors first, then normalized into an [`AnalysisRecord`]. Shape errors
//! (a list where a string belongs, a non-object reply) reject the whole
//! reply; unreadable values inside an otherwise valid shape are normalized:
//!
//! - unreadable dates and times become absent so default policies apply
//! - important dates whose date cannot be read are dropped
//! - unknown priorities become medium
//! - missing titles become [`UNTITLED`]
//! - non-positive or missing durations become the default duration

use minutesync_domain::constants::{DEFAULT_DURATION_MINUTES, UNTITLED};
use minutesync_domain::types::{parse_date, parse_time};
use minutesync_domain::{
    AnalysisRecord, CompletedTask, ImportantDate, MinuteSyncError, Priority, Result, ScheduleItem,
    TodoTask,
};
use serde::Deserialize;
use tracing::warn;

const FENCE: &str = "```";

/// Remove a surrounding Markdown code fence.
///
/// When the trimmed reply starts with a fence marker, its first and last
/// lines are dropped; otherwise the trimmed reply is returned as is.
pub fn strip_code_fence(reply: &str) -> String {
    let trimmed = reply.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed.to_string();
    }
    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() <= 2 {
        return String::new();
    }
    lines[1..lines.len() - 1].join("\n")
}

/// Parse a model reply into a validated record.
///
/// Fails with [`MinuteSyncError::MalformedOutput`] when the reply is not a
/// JSON object of the expected shape.
pub fn parse_analysis(reply: &str) -> Result<AnalysisRecord> {
    let body = strip_code_fence(reply);
    let raw: RawAnalysis = serde_json::from_str(&body)
        .map_err(|e| MinuteSyncError::MalformedOutput(e.to_string()))?;
    Ok(raw.normalize())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAnalysis {
    meeting_title: Option<String>,
    meeting_date: Option<String>,
    department_name: Option<String>,
    summary: Option<String>,
    completed_tasks: Option<Vec<RawCompletedTask>>,
    todo_tasks: Option<Vec<RawTodoTask>>,
    schedule_items: Option<Vec<RawScheduleItem>>,
    important_dates: Option<Vec<RawImportantDate>>,
    participants: Option<Vec<String>>,
    key_decisions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCompletedTask {
    title: Option<String>,
    description: Option<String>,
    who: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTodoTask {
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    who: Option<String>,
    deadline: Option<String>,
    context: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawScheduleItem {
    title: Option<String>,
    description: Option<String>,
    date: Option<String>,
    time: Option<String>,
    duration_minutes: Option<RawDuration>,
    context: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawImportantDate {
    date: Option<String>,
    description: Option<String>,
}

/// Models write durations as integers, floats or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawDuration {
    fn minutes(&self) -> u32 {
        let value = match self {
            Self::Int(n) => *n,
            Self::Float(f) if f.is_finite() => f.round() as i64,
            Self::Float(_) => 0,
            Self::Text(s) => s.trim().parse::<i64>().unwrap_or(0),
        };
        u32::try_from(value).ok().filter(|m| *m > 0).unwrap_or(DEFAULT_DURATION_MINUTES)
    }
}

impl RawAnalysis {
    fn normalize(self) -> AnalysisRecord {
        AnalysisRecord {
            meeting_title: non_empty(self.meeting_title).unwrap_or_default(),
            meeting_date: self.meeting_date.as_deref().and_then(|d| lenient_date("meeting_date", d)),
            department_name: non_empty(self.department_name),
            summary: self.summary.unwrap_or_default(),
            completed_tasks: self
                .completed_tasks
                .unwrap_or_default()
                .into_iter()
                .map(|t| CompletedTask {
                    title: title_or_untitled(t.title),
                    description: t.description.unwrap_or_default(),
                    who: non_empty(t.who),
                })
                .collect(),
            todo_tasks: self.todo_tasks.unwrap_or_default().into_iter().map(normalize_todo).collect(),
            schedule_items: self
                .schedule_items
                .unwrap_or_default()
                .into_iter()
                .map(normalize_schedule_item)
                .collect(),
            important_dates: self
                .important_dates
                .unwrap_or_default()
                .into_iter()
                .filter_map(normalize_important_date)
                .collect(),
            participants: self.participants.unwrap_or_default(),
            key_decisions: self.key_decisions.unwrap_or_default(),
            error: None,
            raw_response: None,
        }
    }
}

fn normalize_todo(raw: RawTodoTask) -> TodoTask {
    TodoTask {
        title: title_or_untitled(raw.title),
        description: raw.description.unwrap_or_default(),
        priority: raw.priority.as_deref().map(Priority::from_label).unwrap_or_default(),
        who: non_empty(raw.who),
        deadline: raw.deadline.as_deref().and_then(|d| lenient_date("deadline", d)),
        context: non_empty(raw.context),
    }
}

fn normalize_schedule_item(raw: RawScheduleItem) -> ScheduleItem {
    ScheduleItem {
        title: title_or_untitled(raw.title),
        description: raw.description.unwrap_or_default(),
        date: raw.date.as_deref().and_then(|d| lenient_date("date", d)),
        time: raw.time.as_deref().and_then(lenient_time),
        duration_minutes: raw
            .duration_minutes
            .as_ref()
            .map_or(DEFAULT_DURATION_MINUTES, RawDuration::minutes),
        context: non_empty(raw.context),
    }
}

fn normalize_important_date(raw: RawImportantDate) -> Option<ImportantDate> {
    let text = raw.date.unwrap_or_default();
    match parse_date(&text) {
        Some(date) => Some(ImportantDate { date, description: raw.description.unwrap_or_default() }),
        None => {
            warn!(date = %text, "dropping important date that cannot be read");
            None
        }
    }
}

fn lenient_date(field: &'static str, text: &str) -> Option<chrono::NaiveDate> {
    if text.trim().is_empty() {
        return None;
    }
    let parsed = parse_date(text);
    if parsed.is_none() {
        let err = MinuteSyncError::InvalidDateTime(format!("{field}: {text}"));
        warn!(error = %err, "treating unreadable date as absent");
    }
    parsed
}

fn lenient_time(text: &str) -> Option<chrono::NaiveTime> {
    if text.trim().is_empty() {
        return None;
    }
    let parsed = parse_time(text);
    if parsed.is_none() {
        let err = MinuteSyncError::InvalidDateTime(format!("time: {text}"));
        warn!(error = %err, "treating unreadable time as absent");
    }
    parsed
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn title_or_untitled(title: Option<String>) -> String {
    non_empty(title).unwrap_or_else(|| UNTITLED.to_string())
}
