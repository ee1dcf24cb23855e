//! Shared test helpers for `minutesync-core` integration tests.
//!
//! Lightweight in-memory fakes for the two ports so tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod llm;
pub mod scheduling;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use minutesync_core::FixedClock;

/// 2026-10-17 01:00 UTC, which is 10:00 on the same day in Seoul.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 1, 0, 0).unwrap()
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(fixed_now()))
}
