//! Plain-text rendering of analysis records and sync reports
//!
//! Rendering is pure: the same input always yields the same text, and
//! absent optional fields are simply left out.

use std::fmt;

use minutesync_domain::types::{format_date, format_time};
use minutesync_domain::{AnalysisRecord, SyncReport};

const RULE_WIDTH: usize = 60;

/// Human-readable rendering.
pub trait Summarize {
    fn summarize(&self) -> String;
}

impl Summarize for AnalysisRecord {
    fn summarize(&self) -> String {
        format_analysis(self)
    }
}

impl Summarize for SyncReport {
    fn summarize(&self) -> String {
        format_report(self)
    }
}

/// Render an analysis record as fixed sections.
pub fn format_analysis(record: &AnalysisRecord) -> String {
    AnalysisText(record).to_string()
}

/// Render a sync report: counts plus one bullet per outcome.
pub fn format_report(report: &SyncReport) -> String {
    ReportText(report).to_string()
}

struct AnalysisText<'a>(&'a AnalysisRecord);

impl fmt::Display for AnalysisText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "📋 Meeting analysis")?;
        writeln!(f, "{rule}")?;
        if !record.meeting_title.is_empty() {
            writeln!(f, "{}", record.meeting_title)?;
        }
        let mut header = Vec::new();
        if let Some(date) = record.meeting_date {
            header.push(format_date(date));
        }
        if let Some(department) = &record.department_name {
            header.push(department.clone());
        }
        if !header.is_empty() {
            writeln!(f, "{}", header.join(" | "))?;
        }
        writeln!(f)?;

        writeln!(f, "📝 Summary:")?;
        if record.summary.is_empty() {
            writeln!(f, "  (no summary)")?;
        } else {
            for line in record.summary.lines() {
                writeln!(f, "  {line}")?;
            }
        }
        writeln!(f)?;

        if let Some(error) = &record.error {
            writeln!(f, "⚠️ Error: {error}")?;
            writeln!(f)?;
        }

        bullets(f, "👥 Participants:", &record.participants)?;
        bullets(f, "✅ Key decisions:", &record.key_decisions)?;

        if !record.completed_tasks.is_empty() {
            writeln!(f, "✔️ Completed tasks:")?;
            for task in &record.completed_tasks {
                writeln!(f, "  - {}{}", task.title, owner(task.who.as_deref()))?;
                description(f, &task.description)?;
            }
            writeln!(f)?;
        }

        if !record.todo_tasks.is_empty() {
            writeln!(f, "📌 Todo tasks:")?;
            for task in &record.todo_tasks {
                let deadline = task
                    .deadline
                    .map(|d| format!(" [due: {}]", format_date(d)))
                    .unwrap_or_default();
                writeln!(
                    f,
                    "  {} {}{}{deadline}",
                    task.priority.glyph(),
                    task.title,
                    owner(task.who.as_deref())
                )?;
                description(f, &task.description)?;
            }
            writeln!(f)?;
        }

        if !record.schedule_items.is_empty() {
            writeln!(f, "📅 Schedule:")?;
            for item in &record.schedule_items {
                let when = match (item.date, item.time) {
                    (Some(date), Some(time)) => {
                        format!(" [{} {}]", format_date(date), format_time(time))
                    }
                    (Some(date), None) => format!(" [{}]", format_date(date)),
                    (None, Some(time)) => format!(" [{}]", format_time(time)),
                    (None, None) => String::new(),
                };
                writeln!(f, "  - {}{when} ({} min)", item.title, item.duration_minutes)?;
                description(f, &item.description)?;
            }
            writeln!(f)?;
        }

        if !record.important_dates.is_empty() {
            writeln!(f, "📆 Important dates:")?;
            for date in &record.important_dates {
                writeln!(f, "  - {}: {}", format_date(date.date), date.description)?;
            }
            writeln!(f)?;
        }

        write!(f, "{rule}")
    }
}

struct ReportText<'a>(&'a SyncReport);

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "📤 Sync results")?;
        writeln!(f, "{rule}")?;

        section(f, "✅ Tasks created", &report.tasks_created)?;
        section(f, "📅 Events created", &report.events_created)?;
        section(f, "❌ Errors", &report.errors)?;

        writeln!(
            f,
            "\n{} item(s) added to the calendar, {} failed.",
            report.total_created(),
            report.errors.len()
        )?;
        write!(f, "{rule}")
    }
}

fn bullets(f: &mut fmt::Formatter<'_>, heading: &str, lines: &[String]) -> fmt::Result {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(f, "{heading}")?;
    for line in lines {
        writeln!(f, "  - {line}")?;
    }
    writeln!(f)
}

fn section(f: &mut fmt::Formatter<'_>, heading: &str, lines: &[String]) -> fmt::Result {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(f, "\n{heading} ({}):", lines.len())?;
    for line in lines {
        writeln!(f, "  - {line}")?;
    }
    Ok(())
}

fn owner(who: Option<&str>) -> String {
    who.map(|w| format!(" ({w})")).unwrap_or_default()
}

fn description(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if text.is_empty() {
        return Ok(());
    }
    writeln!(f, "    → {text}")
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use minutesync_domain::{ImportantDate, Priority, ScheduleItem, TodoTask};

    use super::*;

    fn record() -> AnalysisRecord {
        AnalysisRecord {
            meeting_title: "Launch/Platform/26-10-17".into(),
            summary: "Line one\nLine two".into(),
            participants: vec!["Kim".into()],
            todo_tasks: vec![TodoTask {
                title: "Write report".into(),
                description: "Quarterly numbers".into(),
                priority: Priority::High,
                who: Some("Park".into()),
                deadline: NaiveDate::from_ymd_opt(2026, 10, 31),
                context: None,
            }],
            schedule_items: vec![ScheduleItem {
                title: "Demo".into(),
                description: String::new(),
                date: NaiveDate::from_ymd_opt(2026, 10, 20),
                time: NaiveTime::from_hms_opt(15, 0, 0),
                duration_minutes: 45,
                context: None,
            }],
            important_dates: vec![ImportantDate {
                date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
                description: "Beta".into(),
            }],
            ..AnalysisRecord::default()
        }
    }

    #[test]
    fn renders_populated_sections_only() {
        let text = format_analysis(&record());
        assert!(text.contains("  Line one\n  Line two"));
        assert!(text.contains("👥 Participants:\n  - Kim"));
        assert!(text.contains("🔴 Write report (Park) [due: 2026-10-31]"));
        assert!(text.contains("    → Quarterly numbers"));
        assert!(text.contains("  - Demo [2026-10-20 15:00] (45 min)"));
        assert!(text.contains("  - 2026-11-01: Beta"));
        assert!(!text.contains("Key decisions"));
        assert!(!text.contains("Completed tasks"));
        assert!(!text.contains("Error"));
    }

    #[test]
    fn renders_degraded_records() {
        let text = AnalysisRecord::rate_limited().summarize();
        assert!(text.contains("Rate Limit Exceeded"));
        assert!(!text.contains("Todo tasks"));
    }

    #[test]
    fn report_shows_successes_and_failures() {
        let report = SyncReport {
            tasks_created: vec!["Task created: a".into()],
            events_created: vec![],
            errors: vec!["Failed to create event: b - boom".into()],
            synced: vec![],
        };
        let text = format_report(&report);
        assert!(text.contains("✅ Tasks created (1):\n  - Task created: a"));
        assert!(text.contains("❌ Errors (1):\n  - Failed to create event: b - boom"));
        assert!(!text.contains("Events created"));
        assert!(text.contains("1 item(s) added to the calendar, 1 failed."));
        assert_eq!(text, report.summarize());
    }

    #[test]
    fn empty_report_is_just_the_frame_and_totals() {
        let rule = "=".repeat(RULE_WIDTH);
        assert_eq!(
            format_report(&SyncReport::default()),
            format!("{rule}\n📤 Sync results\n{rule}\n\n0 item(s) added to the calendar, 0 failed.\n{rule}")
        );
    }
}
