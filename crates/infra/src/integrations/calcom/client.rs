//! Cal.com scheduling adapter

use async_trait::async_trait;
use minutesync_core::SchedulingService;
use minutesync_domain::{
    Booking, BookingRequest, ExternalEventType, MinuteSyncError, NewEventType, Result,
    SchedulerApiVersion, SchedulerConfig,
};
use reqwest::{Method, RequestBuilder};
use tracing::{debug, instrument};

use super::types::{
    AttendeeResponses, BookingPayload, DataEnvelope, EventTypeListing, Location, NewEventTypeV1,
    NewEventTypeV2, V1EventType, V1EventTypes, WireBooking, WireEventType,
};
use crate::http::HttpClient;

const EVENT_TYPES_API_VERSION: &str = "2024-06-14";
const BOOKINGS_API_VERSION: &str = "2024-08-13";

/// [`SchedulingService`] backed by a Cal.com instance.
///
/// `api_version` selects the dialect: v1 sends the key as an `apiKey` query
/// parameter under `/v1`, v2 sends it as a bearer token under `/api/v2` and
/// unwraps `{"data": ...}` envelopes. The base URL may be given with or
/// without that version prefix (`https://api.cal.com` or
/// `https://api.cal.com/v1`).
pub struct CalcomClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
    version: SchedulerApiVersion,
    user_id: Option<i64>,
}

impl CalcomClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        version: SchedulerApiVersion,
        http_client: HttpClient,
    ) -> Self {
        Self {
            http_client,
            base_url: service_root(&base_url.into(), version).to_string(),
            api_key: api_key.into(),
            version,
            user_id: None,
        }
    }

    /// Build from configuration; fails when no API key is configured.
    pub fn from_config(config: &SchedulerConfig, http_client: HttpClient) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| MinuteSyncError::Config("scheduler API key is not set".into()))?;
        let user_id = match config.user_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                MinuteSyncError::Config(format!("scheduler user id is not numeric: {raw}"))
            })?),
            None => None,
        };
        let mut client = Self::new(api_key, &config.base_url, config.api_version, http_client);
        client.user_id = user_id;
        Ok(client)
    }

    /// Only keep event types owned by this user when listings include owners.
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    fn request(&self, method: Method, resource: &str, api_version: &str) -> RequestBuilder {
        match self.version {
            SchedulerApiVersion::V1 => self
                .http_client
                .request(method, format!("{}/v1/{resource}", self.base_url))
                .query(&[("apiKey", self.api_key.as_str())]),
            SchedulerApiVersion::V2 => self
                .http_client
                .request(method, format!("{}/api/v2/{resource}", self.base_url))
                .bearer_auth(&self.api_key)
                .header("cal-api-version", api_version),
        }
    }

    fn owned_by_user(&self, event_type: &WireEventType) -> bool {
        match (self.user_id, event_type.user_id) {
            (Some(wanted), Some(owner)) => wanted == owner,
            _ => true,
        }
    }
}

/// Base URL without trailing slashes or the dialect's own path prefix.
fn service_root(base_url: &str, version: SchedulerApiVersion) -> &str {
    let trimmed = base_url.trim_end_matches('/');
    let prefix = match version {
        SchedulerApiVersion::V1 => "/v1",
        SchedulerApiVersion::V2 => "/api/v2",
    };
    trimmed.strip_suffix(prefix).unwrap_or(trimmed)
}

#[async_trait]
impl SchedulingService for CalcomClient {
    #[instrument(skip(self), fields(version = %self.version))]
    async fn list_event_types(&self) -> Result<Vec<ExternalEventType>> {
        let request = self.request(Method::GET, "event-types", EVENT_TYPES_API_VERSION);
        let listed = match self.version {
            SchedulerApiVersion::V1 => {
                self.http_client.send_json::<V1EventTypes>(request).await?.event_types
            }
            SchedulerApiVersion::V2 => self
                .http_client
                .send_json::<DataEnvelope<EventTypeListing>>(request)
                .await?
                .data
                .into_vec(),
        };
        debug!(count = listed.len(), "listed event types");
        Ok(listed
            .into_iter()
            .filter(|et| self.owned_by_user(et))
            .map(ExternalEventType::from)
            .collect())
    }

    #[instrument(skip(self, event_type), fields(title = %event_type.title))]
    async fn create_event_type(&self, event_type: &NewEventType) -> Result<ExternalEventType> {
        let request = self.request(Method::POST, "event-types", EVENT_TYPES_API_VERSION);
        let created = match self.version {
            SchedulerApiVersion::V1 => {
                let body = NewEventTypeV1 {
                    title: &event_type.title,
                    slug: &event_type.slug,
                    length: event_type.duration_minutes,
                    description: &event_type.description,
                };
                self.http_client.send_json::<V1EventType>(request.json(&body)).await?.event_type
            }
            SchedulerApiVersion::V2 => {
                let body = NewEventTypeV2 {
                    title: &event_type.title,
                    slug: &event_type.slug,
                    length_in_minutes: event_type.duration_minutes,
                    description: &event_type.description,
                };
                self.http_client
                    .send_json::<DataEnvelope<WireEventType>>(request.json(&body))
                    .await?
                    .data
            }
        };
        Ok(created.into())
    }

    #[instrument(skip(self, booking), fields(event_type_id = booking.event_type_id, start = %booking.start))]
    async fn create_booking(&self, booking: &BookingRequest) -> Result<Booking> {
        let body = BookingPayload {
            event_type_id: booking.event_type_id,
            start: booking.start.to_rfc3339(),
            responses: AttendeeResponses {
                name: &booking.attendee.name,
                email: &booking.attendee.email,
                notes: booking.attendee.notes.as_deref(),
                location: Location::default(),
            },
            time_zone: &booking.timezone,
            language: &booking.language,
            metadata: &booking.metadata,
        };
        let request = self.request(Method::POST, "bookings", BOOKINGS_API_VERSION).json(&body);

        let created = match self.version {
            SchedulerApiVersion::V1 => self.http_client.send_json::<WireBooking>(request).await,
            SchedulerApiVersion::V2 => self
                .http_client
                .send_json::<DataEnvelope<WireBooking>>(request)
                .await
                .map(|env| env.data),
        }
        .map_err(|err| MinuteSyncError::BookingFailed(err.to_string()))?;

        debug!(booking_id = ?created.id, "booking created");
        Ok(created.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_prefix_is_stripped_from_the_base_url() {
        let v1 = SchedulerApiVersion::V1;
        let v2 = SchedulerApiVersion::V2;
        assert_eq!(service_root("https://api.cal.com/v1", v1), "https://api.cal.com");
        assert_eq!(service_root("https://api.cal.com/v1/", v1), "https://api.cal.com");
        assert_eq!(service_root("https://api.cal.com/", v1), "https://api.cal.com");
        assert_eq!(service_root("https://api.cal.com/api/v2", v2), "https://api.cal.com");
        assert_eq!(service_root("https://cal.example/v1", v2), "https://cal.example/v1");
    }
}
