//! SyncEngine - analysis records to bookings
//!
//! Tasks are booked first, then meetings, each in source order. Every item
//! produces exactly one outcome in the [`SyncReport`]; a failing item never
//! stops the run.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use minutesync_domain::constants::TODO_MARKER;
use minutesync_domain::types::{format_date, format_time};
use minutesync_domain::{
    AnalysisRecord, Attendee, BookingRequest, EventCategory, ExternalEventType, MinuteSyncError,
    Result, ScheduleItem, SyncReport, SyncSettings, SyncedBooking, TodoTask,
};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::ports::SchedulingService;
use super::resolver::ScheduleResourceResolver;
use super::schedule::{default_date, localize};
use crate::utils::clock::Clock;

/// One booking the engine is about to create.
struct PlannedBooking {
    kind: EventCategory,
    /// Title as shown to users
    title: String,
    date: NaiveDate,
    time: NaiveTime,
    duration_minutes: u32,
    notes: Option<String>,
    metadata: BTreeMap<String, String>,
}

pub struct SyncEngine {
    service: Arc<dyn SchedulingService>,
    clock: Arc<dyn Clock>,
    settings: SyncSettings,
    timezone: Tz,
    // Shared by the resolvers of concurrent runs.
    resolution_lock: Arc<Mutex<()>>,
}

impl SyncEngine {
    /// Fails with a configuration error when the configured timezone is not
    /// a known IANA name.
    pub fn new(
        service: Arc<dyn SchedulingService>,
        clock: Arc<dyn Clock>,
        settings: SyncSettings,
    ) -> Result<Self> {
        let timezone = settings.tz()?;
        Ok(Self { service, clock, settings, timezone, resolution_lock: Arc::new(Mutex::new(())) })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Event types currently defined on the scheduling service.
    pub async fn event_types(&self) -> Result<Vec<ExternalEventType>> {
        self.service.list_event_types().await
    }

    /// Create one booking per todo task and schedule item.
    #[instrument(skip_all, fields(tasks = record.todo_tasks.len(), events = record.schedule_items.len()))]
    pub async fn sync(&self, record: &AnalysisRecord) -> SyncReport {
        let mut resolver = ScheduleResourceResolver::with_lock(
            Arc::clone(&self.service),
            Arc::clone(&self.resolution_lock),
        );
        let mut report = SyncReport::default();

        for task in &record.todo_tasks {
            let plan = self.plan_task(task);
            match self.book(&mut resolver, &plan).await {
                Ok(synced) => {
                    report.tasks_created.push(format!(
                        "Task created: {} ({} {})",
                        plan.title,
                        format_date(plan.date),
                        format_time(plan.time)
                    ));
                    report.synced.push(synced);
                }
                Err(err) => {
                    warn!(title = %task.title, error = %err, "task booking failed");
                    report.errors.push(format!("Failed to create task: {} - {err}", task.title));
                }
            }
        }

        for item in &record.schedule_items {
            let plan = self.plan_meeting(item);
            match self.book(&mut resolver, &plan).await {
                Ok(synced) => {
                    report.events_created.push(format!(
                        "Event created: {} ({} {})",
                        plan.title,
                        format_date(plan.date),
                        format_time(plan.time)
                    ));
                    report.synced.push(synced);
                }
                Err(err) => {
                    warn!(title = %item.title, error = %err, "event booking failed");
                    report.errors.push(format!("Failed to create event: {} - {err}", item.title));
                }
            }
        }

        info!(
            tasks_created = report.tasks_created.len(),
            events_created = report.events_created.len(),
            errors = report.errors.len(),
            "sync finished"
        );
        report
    }

    fn plan_task(&self, task: &TodoTask) -> PlannedBooking {
        let date = task.deadline.unwrap_or_else(|| {
            default_date(self.clock.now(), self.timezone, self.settings.task_default_offset_days)
        });

        let mut notes = format!("Priority: {}", task.priority.to_string().to_uppercase());
        if !task.description.is_empty() {
            notes.push_str("\n\n");
            notes.push_str(&task.description);
        }

        let mut metadata = base_metadata(EventCategory::Task, &task.description);
        metadata.insert("priority".into(), task.priority.to_string());
        if let Some(deadline) = task.deadline {
            metadata.insert("deadline".into(), format_date(deadline));
        }
        if let Some(who) = &task.who {
            metadata.insert("who".into(), who.clone());
        }

        PlannedBooking {
            kind: EventCategory::Task,
            title: format!("{} {TODO_MARKER} {}", task.priority.glyph(), task.title),
            date,
            time: self.settings.task_default_time,
            duration_minutes: self.settings.default_duration_minutes,
            notes: Some(notes),
            metadata,
        }
    }

    fn plan_meeting(&self, item: &ScheduleItem) -> PlannedBooking {
        let date = item.date.unwrap_or_else(|| {
            default_date(self.clock.now(), self.timezone, self.settings.meeting_default_offset_days)
        });
        let duration_minutes = if item.duration_minutes == 0 {
            self.settings.default_duration_minutes
        } else {
            item.duration_minutes
        };

        PlannedBooking {
            kind: EventCategory::Meeting,
            title: item.title.clone(),
            date,
            time: item.time.unwrap_or(self.settings.meeting_default_time),
            duration_minutes,
            notes: (!item.description.is_empty()).then(|| item.description.clone()),
            metadata: base_metadata(EventCategory::Meeting, &item.description),
        }
    }

    async fn book(
        &self,
        resolver: &mut ScheduleResourceResolver,
        plan: &PlannedBooking,
    ) -> Result<SyncedBooking> {
        let start = localize(plan.date, plan.time, self.timezone)?;
        let event_type = resolver.resolve(plan.kind, plan.duration_minutes).await?;

        let mut metadata = plan.metadata.clone();
        metadata.insert("title".into(), plan.title.clone());

        let request = BookingRequest {
            event_type_id: event_type.id,
            start,
            attendee: Attendee {
                name: self.settings.attendee_name.clone(),
                email: self.settings.attendee_email.clone(),
                notes: plan.notes.clone(),
            },
            timezone: self.timezone.name().to_string(),
            language: self.settings.language.clone(),
            metadata,
        };

        let booking = self.service.create_booking(&request).await.map_err(into_booking_failure)?;
        Ok(SyncedBooking {
            kind: plan.kind,
            title: plan.title.clone(),
            start: request.start,
            event_type_id: event_type.id,
            booking_id: booking.id,
        })
    }
}

fn base_metadata(kind: EventCategory, description: &str) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    metadata.insert("kind".into(), kind.slug());
    metadata.insert("auto_created".into(), "true".into());
    if !description.is_empty() {
        metadata.insert("description".into(), description.to_string());
    }
    metadata
}

fn into_booking_failure(err: MinuteSyncError) -> MinuteSyncError {
    match err {
        MinuteSyncError::BookingFailed(_) => err,
        other => MinuteSyncError::BookingFailed(other.to_string()),
    }
}

