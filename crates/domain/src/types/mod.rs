//! Domain types and models
//!
//! - [`analysis`]: the structured record produced from meeting notes
//! - [`scheduling`]: resources of the external scheduling service
//! - [`report`]: the per-run synchronization report

pub mod analysis;
pub mod formats;
pub mod report;
pub mod scheduling;

pub use analysis::{
    AnalysisRecord, CompletedTask, ImportantDate, Priority, ScheduleItem, TodoTask,
};
pub use formats::{format_date, format_time, parse_date, parse_time};
pub use report::{SyncReport, SyncedBooking};
pub use scheduling::{
    slugify, Attendee, Booking, BookingRequest, EventCategory, ExternalEventType, NewEventType,
};
