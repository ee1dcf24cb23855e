use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use minutesync_core::SchedulingService;
use minutesync_domain::{
    Booking, BookingRequest, ExternalEventType, MinuteSyncError, NewEventType, Result,
};

/// In-memory scheduling service that records every call.
///
/// Failures can be injected per operation: a booking whose metadata title
/// contains `fail_bookings_matching` is rejected.
#[derive(Default)]
pub struct InMemoryScheduler {
    event_types: Mutex<Vec<ExternalEventType>>,
    bookings: Mutex<Vec<BookingRequest>>,
    list_calls: AtomicI64,
    create_type_calls: AtomicI64,
    next_id: AtomicI64,
    fail_listing: bool,
    fail_type_creation: bool,
    fail_bookings_matching: Option<String>,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self { next_id: AtomicI64::new(100), ..Self::default() }
    }

    pub fn with_event_type(self, id: i64, title: &str, slug: &str, duration_minutes: u32) -> Self {
        self.event_types.lock().unwrap().push(ExternalEventType {
            id,
            title: title.into(),
            slug: slug.into(),
            duration_minutes,
        });
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_type_creation(mut self) -> Self {
        self.fail_type_creation = true;
        self
    }

    pub fn failing_bookings_matching(mut self, needle: &str) -> Self {
        self.fail_bookings_matching = Some(needle.into());
        self
    }

    pub fn bookings(&self) -> Vec<BookingRequest> {
        self.bookings.lock().unwrap().clone()
    }

    pub fn event_types(&self) -> Vec<ExternalEventType> {
        self.event_types.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> i64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_type_calls(&self) -> i64 {
        self.create_type_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchedulingService for InMemoryScheduler {
    async fn list_event_types(&self) -> Result<Vec<ExternalEventType>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        // Let concurrent runs interleave between listing and creating.
        tokio::task::yield_now().await;
        if self.fail_listing {
            return Err(MinuteSyncError::Network("connection refused".into()));
        }
        Ok(self.event_types.lock().unwrap().clone())
    }

    async fn create_event_type(&self, event_type: &NewEventType) -> Result<ExternalEventType> {
        self.create_type_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_type_creation {
            return Err(MinuteSyncError::InvalidInput("slug already taken".into()));
        }
        let created = ExternalEventType {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: event_type.title.clone(),
            slug: event_type.slug.clone(),
            duration_minutes: event_type.duration_minutes,
        };
        self.event_types.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking> {
        if let Some(needle) = &self.fail_bookings_matching {
            let title = request.metadata.get("title").cloned().unwrap_or_default();
            if title.contains(needle.as_str()) {
                return Err(MinuteSyncError::InvalidInput("no available slot".into()));
            }
        }
        let mut bookings = self.bookings.lock().unwrap();
        bookings.push(request.clone());
        Ok(Booking { id: Some(bookings.len() as i64), uid: Some(format!("uid-{}", bookings.len())) })
    }
}
