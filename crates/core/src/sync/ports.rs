//! Port interfaces for the external scheduling service

use async_trait::async_trait;
use minutesync_domain::{Booking, BookingRequest, ExternalEventType, NewEventType, Result};

/// Capability contract of a scheduling service.
///
/// Every concrete service (and every API dialect of one) implements the same
/// three calls; picking a service is a configuration choice.
#[async_trait]
pub trait SchedulingService: Send + Sync {
    /// List the event types visible to the configured account
    async fn list_event_types(&self) -> Result<Vec<ExternalEventType>>;

    /// Create an event type and return it as stored
    async fn create_event_type(&self, event_type: &NewEventType) -> Result<ExternalEventType>;

    /// Create one booking of an existing event type
    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking>;
}
