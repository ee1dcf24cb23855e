//! ScheduleResourceResolver - find-or-create of event types

use std::collections::HashMap;
use std::sync::Arc;

use minutesync_domain::{EventCategory, ExternalEventType, MinuteSyncError, NewEventType, Result};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::ports::SchedulingService;

/// Resolves the event type a booking category needs, creating it on the
/// service when it does not exist yet.
///
/// A resolver caches what it resolved, so one resolver must live for exactly
/// one sync run: the next run re-reads the service. Resolvers that share a
/// lock (see [`ScheduleResourceResolver::with_lock`]) list and create under
/// it, so concurrent runs in one process never create the same event type
/// twice. Other processes are not coordinated with.
pub struct ScheduleResourceResolver {
    service: Arc<dyn SchedulingService>,
    resolved: HashMap<EventCategory, ExternalEventType>,
    lock: Arc<Mutex<()>>,
}

impl ScheduleResourceResolver {
    pub fn new(service: Arc<dyn SchedulingService>) -> Self {
        Self::with_lock(service, Arc::new(Mutex::new(())))
    }

    /// Serialize find-or-create with every other resolver holding `lock`.
    pub fn with_lock(service: Arc<dyn SchedulingService>, lock: Arc<Mutex<()>>) -> Self {
        Self { service, resolved: HashMap::new(), lock }
    }

    /// Return the event type for `category`.
    ///
    /// An existing event type wins as is, its duration included;
    /// `duration_minutes` only applies when one has to be created. Listing or
    /// creation failures surface as [`MinuteSyncError::ResourceUnavailable`].
    pub async fn resolve(
        &mut self,
        category: EventCategory,
        duration_minutes: u32,
    ) -> Result<ExternalEventType> {
        if let Some(hit) = self.resolved.get(&category) {
            return Ok(hit.clone());
        }

        let _guard = self.lock.lock().await;
        let existing = self.service.list_event_types().await.map_err(|e| {
            MinuteSyncError::ResourceUnavailable(format!("listing event types failed: {e}"))
        })?;

        let event_type = match existing.into_iter().find(|et| category.matches(et)) {
            Some(found) => {
                debug!(%category, id = found.id, "using existing event type");
                found
            }
            None => {
                let new = NewEventType::for_category(category, duration_minutes);
                let created = self.service.create_event_type(&new).await.map_err(|e| {
                    MinuteSyncError::ResourceUnavailable(format!(
                        "creating event type '{}' failed: {e}",
                        new.title
                    ))
                })?;
                info!(%category, id = created.id, duration_minutes, "created event type");
                created
            }
        };

        self.resolved.insert(category, event_type.clone());
        Ok(event_type)
    }
}
