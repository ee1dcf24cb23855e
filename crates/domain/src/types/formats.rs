//! Canonical textual forms for calendar dates and times of day
//!
//! Dates are `YYYY-MM-DD`, times are 24-hour `HH:MM`. The `parse_*` helpers
//! are lenient about the separators an LLM or a human tends to produce; the
//! serde modules always write the canonical form.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::constants::{DATE_FORMAT, TIME_FORMAT};

const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const TIME_INPUT_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Parse a calendar date, accepting `-`, `/` or `.` as separators.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_INPUT_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Parse a 24-hour time of day. Seconds are accepted and discarded.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    TIME_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .and_then(|t| t.with_second(0))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Serde adapter for `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid time of day: {raw}")))
    }

    /// Same as the parent module, for optional fields.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => serializer.serialize_some(&super::super::format_time(*t)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) => super::super::parse_time(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid time of day: {raw}"))),
            }
        }
    }
}
