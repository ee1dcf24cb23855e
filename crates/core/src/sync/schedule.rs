//! Concrete start times for bookings
//!
//! Items without a date fall back to "today in the configured timezone plus
//! N days"; items without a time fall back to a per-category default. The
//! result is localized to the configured timezone.

use chrono::{DateTime, Days, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use minutesync_domain::{MinuteSyncError, Result};

/// Calendar day `offset_days` after `now`, as seen in `tz`.
pub fn default_date(now: DateTime<Utc>, tz: Tz, offset_days: i64) -> NaiveDate {
    let today = now.with_timezone(&tz).date_naive();
    let shifted = if offset_days >= 0 {
        today.checked_add_days(Days::new(offset_days.unsigned_abs()))
    } else {
        today.checked_sub_days(Days::new(offset_days.unsigned_abs()))
    };
    shifted.unwrap_or(today)
}

/// Localize a wall-clock date and time to `tz`.
///
/// An ambiguous local time (clocks going back) resolves to the earlier
/// instant. A local time inside a gap (clocks going forward) moves one hour
/// later.
pub fn localize(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::new(date, time);
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| {
            MinuteSyncError::InvalidDateTime(format!("{naive} does not exist in {tz}"))
        })
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn default_date_uses_the_configured_calendar_day() {
        // 20:00 UTC on the 17th is already the 18th in Seoul.
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 20, 0, 0).unwrap();
        assert_eq!(
            default_date(now, chrono_tz::Asia::Seoul, 1),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        assert_eq!(
            default_date(now, chrono_tz::UTC, 7),
            NaiveDate::from_ymd_opt(2026, 10, 24).unwrap()
        );
    }

    #[test]
    fn localizes_with_the_zone_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let start = localize(date, time, chrono_tz::Asia::Seoul).unwrap();
        assert_eq!(start.to_rfc3339(), "2026-10-18T09:00:00+09:00");
    }

    #[test]
    fn handles_daylight_saving_transitions() {
        let tz = chrono_tz::America::New_York;
        // 2026-03-08 02:30 does not exist in New York.
        let gap = localize(
            NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            NaiveTime::from_hms_opt(2, 30, 0).unwrap(),
            tz,
        )
        .unwrap();
        assert_eq!(gap.hour(), 3);

        // 2026-11-01 01:30 happens twice; the EDT instant comes first.
        let ambiguous = localize(
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            NaiveTime::from_hms_opt(1, 30, 0).unwrap(),
            tz,
        )
        .unwrap();
        assert_eq!(ambiguous.offset().local_minus_utc(), -4 * 3600);
    }
}
