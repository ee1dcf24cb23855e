//! Scheduling-service resource model
//!
//! An event type is a reusable booking template on the scheduling service;
//! a booking is one concrete occurrence of an event type.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The two categories of bookings MinuteSync creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Task,
    Meeting,
}

impl EventCategory {
    /// Event-type title on the scheduling service.
    pub fn title(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Meeting => "Meeting",
        }
    }

    /// Slug the category is looked up by.
    pub fn slug(self) -> String {
        slugify(self.title())
    }

    pub fn matches(self, event_type: &ExternalEventType) -> bool {
        event_type.title == self.title() || event_type.slug == self.slug()
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Lowercase the title and join its words with hyphens.
pub fn slugify(title: &str) -> String {
    title.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join("-")
}

/// An event type as the scheduling service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEventType {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub duration_minutes: u32,
}

/// Payload for creating an event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEventType {
    pub title: String,
    pub slug: String,
    pub duration_minutes: u32,
    pub description: String,
}

impl NewEventType {
    pub fn for_category(category: EventCategory, duration_minutes: u32) -> Self {
        Self {
            title: category.title().to_string(),
            slug: category.slug(),
            duration_minutes,
            description: format!("{} bookings created from meeting notes", category.title()),
        }
    }
}

/// Who a booking is made for. Auto-created bookings use a fixed system
/// identity because no human attendee exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for creating a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub event_type_id: i64,
    /// Start, already localized to `timezone`
    pub start: DateTime<FixedOffset>,
    pub attendee: Attendee,
    /// IANA timezone name sent alongside the start time
    pub timezone: String,
    pub language: String,
    pub metadata: BTreeMap<String, String>,
}

/// A booking as the scheduling service returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub uid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_type(title: &str, slug: &str) -> ExternalEventType {
        ExternalEventType { id: 1, title: title.into(), slug: slug.into(), duration_minutes: 30 }
    }

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Task"), "task");
        assert_eq!(slugify("  Design   Review "), "design-review");
    }

    #[test]
    fn category_matches_on_title_or_slug() {
        assert!(EventCategory::Task.matches(&event_type("Task", "todo")));
        assert!(EventCategory::Task.matches(&event_type("My tasks", "task")));
        assert!(!EventCategory::Task.matches(&event_type("task", "tasks")));
        assert!(!EventCategory::Meeting.matches(&event_type("Task", "task")));
    }

    #[test]
    fn new_event_type_uses_category_identity() {
        let new = NewEventType::for_category(EventCategory::Meeting, 45);
        assert_eq!(new.title, "Meeting");
        assert_eq!(new.slug, "meeting");
        assert_eq!(new.duration_minutes, 45);
    }
}
