//! Cal.com integration
//!
//! One [`CalcomClient`] covers both the v1 (query-key) and v2 (bearer) API
//! dialects behind the [`minutesync_core::SchedulingService`] port.

pub mod client;
pub(crate) mod types;

pub use client::CalcomClient;
