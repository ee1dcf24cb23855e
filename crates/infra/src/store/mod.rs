//! Local persistence of the last analyzed notes and synced bookings

pub mod json_store;

pub use json_store::{JsonStateStore, StoredState};
