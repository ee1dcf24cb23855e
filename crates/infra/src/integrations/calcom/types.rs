/// Cal.com wire types shared by both API dialects
use std::collections::BTreeMap;

use minutesync_domain::constants::DEFAULT_DURATION_MINUTES;
use minutesync_domain::{Booking, ExternalEventType};
use serde::{Deserialize, Serialize};

/// Event type as either dialect returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireEventType {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, alias = "lengthInMinutes")]
    pub length: Option<u32>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl From<WireEventType> for ExternalEventType {
    fn from(wire: WireEventType) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            slug: wire.slug,
            duration_minutes: wire.length.filter(|l| *l > 0).unwrap_or(DEFAULT_DURATION_MINUTES),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewEventTypeV1<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub length: u32,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewEventTypeV2<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub length_in_minutes: u32,
    pub description: &'a str,
}

/// Booking payload; identical in both dialects apart from the envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingPayload<'a> {
    pub event_type_id: i64,
    /// ISO-8601 with the local offset
    pub start: String,
    pub responses: AttendeeResponses<'a>,
    pub time_zone: &'a str,
    pub language: &'a str,
    pub metadata: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AttendeeResponses<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
    pub location: Location,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Location {
    pub value: &'static str,
    pub option_value: &'static str,
}

impl Default for Location {
    fn default() -> Self {
        Self { value: "inPerson", option_value: "" }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireBooking {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub uid: Option<String>,
}

impl From<WireBooking> for Booking {
    fn from(wire: WireBooking) -> Self {
        Self { id: wire.id, uid: wire.uid }
    }
}

/// v2 wraps every payload in `{"status": ..., "data": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// v2 event-type listings come either flat or grouped by owner.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EventTypeListing {
    Flat(Vec<WireEventType>),
    Grouped {
        #[serde(rename = "eventTypeGroups")]
        groups: Vec<EventTypeGroup>,
    },
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventTypeGroup {
    #[serde(default, rename = "eventTypes")]
    pub event_types: Vec<WireEventType>,
}

impl EventTypeListing {
    pub fn into_vec(self) -> Vec<WireEventType> {
        match self {
            Self::Flat(list) => list,
            Self::Grouped { groups } => groups.into_iter().flat_map(|g| g.event_types).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct V1EventTypes {
    pub event_types: Vec<WireEventType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct V1EventType {
    pub event_type: WireEventType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_either_duration_field() {
        let v1: WireEventType =
            serde_json::from_str(r#"{"id": 1, "title": "Task", "slug": "task", "length": 30}"#)
                .unwrap();
        let v2: WireEventType = serde_json::from_str(
            r#"{"id": 2, "title": "Meeting", "slug": "meeting", "lengthInMinutes": 45}"#,
        )
        .unwrap();
        assert_eq!(ExternalEventType::from(v1).duration_minutes, 30);
        assert_eq!(ExternalEventType::from(v2).duration_minutes, 45);
    }

    #[test]
    fn listing_accepts_grouped_shape() {
        let json = r#"{"eventTypeGroups": [{"eventTypes": [{"id": 3, "title": "Task", "slug": "task"}]}]}"#;
        let listing: EventTypeListing = serde_json::from_str(json).unwrap();
        let types = listing.into_vec();
        assert_eq!(types.len(), 1);
        assert_eq!(ExternalEventType::from(types[0].clone()).duration_minutes, 60);
    }
}
