use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::api::EpochMillis;
use crate::config;

pub fn app_time_zone() -> Tz {
    config::current_time_zone()
}

/// `MM/DD/YYYY` in `tz`; empty when the timestamp is out of range.
pub fn format_epoch_date(millis: EpochMillis, tz: Tz) -> String {
    millis
        .to_utc()
        .map(|instant| instant.with_timezone(&tz).format("%m/%d/%Y").to_string())
        .unwrap_or_default()
}

pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn parse_time_input(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

pub fn format_time(value: NaiveTime) -> String {
    value.format("%H:%M").to_string()
}

/// Midnight of `date` in `tz`, rendered as an RFC 3339 UTC instant.
pub fn date_to_utc_rfc3339(date: NaiveDate, tz: Tz) -> String {
    let midnight = date.and_time(NaiveTime::MIN);
    let instant = tz
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight));
    instant.to_rfc3339()
}
