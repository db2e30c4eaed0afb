use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config;

fn app_time_zone() -> Tz {
    config::LOCALE.time_zone
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn in_app_tz(value: DateTime<Utc>) -> DateTime<Tz> {
    value.with_timezone(&app_time_zone())
}

/// Last instant of the calendar month containing `now`, in the app time zone.
pub fn end_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    let local = in_app_tz(now);
    let (year, month) = if local.month() == 12 {
        (local.year() + 1, 1)
    } else {
        (local.year(), local.month() + 1)
    };
    let next_month = NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    match next_month.and_then(|naive| app_time_zone().from_local_datetime(&naive).earliest()) {
        Some(start) => start.with_timezone(&Utc) - Duration::milliseconds(1),
        None => now,
    }
}
