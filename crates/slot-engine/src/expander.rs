//! Weekly availability expansion -- turns a recurring weekly pattern into the
//! concrete intervals it yields on one calendar date.
//!
//! Expansion never fails. A time range that cannot be turned into a valid
//! interval is skipped, reported as a [`MalformedRange`], and logged at warn
//! level; the remaining ranges are still expanded.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::interval::Interval;
use crate::schedule::{TimeRange, WeeklyAvailability};
use crate::weekday::Weekday;

/// Why a time range was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MalformedReason {
    /// `start` or `end` is blank.
    MissingEndpoint,
    /// An endpoint is not a recognizable time of day.
    Unparsable { value: String },
    /// The range is empty or reversed once anchored on the date.
    NotIncreasing,
}

/// A time range that was skipped during expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedRange {
    pub weekday: Weekday,
    /// Position of the range within the day's `timeSlots`.
    pub index: usize,
    pub range: TimeRange,
    pub reason: MalformedReason,
}

/// Result of expanding one participant's pattern on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayExpansion {
    /// Intervals in the order their ranges appear in the schedule.
    pub intervals: Vec<Interval>,
    pub diagnostics: Vec<MalformedRange>,
}

/// Expand `availability` on `date`, collecting diagnostics for skipped ranges.
///
/// Only the first entry whose weekday matches `date` is used. Intervals are
/// neither sorted nor merged.
pub fn expand_day(availability: &WeeklyAvailability, date: NaiveDate) -> DayExpansion {
    let weekday = Weekday::of(date);
    let Some(day) = availability.for_day(weekday) else {
        return DayExpansion::default();
    };

    let mut expansion = DayExpansion::default();
    for (index, range) in day.time_slots.iter().enumerate() {
        match anchor_range(range, date) {
            Ok(interval) => expansion.intervals.push(interval),
            Err(reason) => {
                tracing::warn!(
                    weekday = %weekday,
                    index,
                    start = %range.start,
                    end = %range.end,
                    ?reason,
                    "skipping malformed availability range"
                );
                expansion.diagnostics.push(MalformedRange {
                    weekday,
                    index,
                    range: range.clone(),
                    reason,
                });
            }
        }
    }
    expansion
}

/// Expand `availability` on `date`, discarding diagnostics.
pub fn expand_availability(availability: &WeeklyAvailability, date: NaiveDate) -> Vec<Interval> {
    expand_day(availability, date).intervals
}

fn anchor_range(range: &TimeRange, date: NaiveDate) -> std::result::Result<Interval, MalformedReason> {
    if range.start.trim().is_empty() || range.end.trim().is_empty() {
        return Err(MalformedReason::MissingEndpoint);
    }
    let start = parse_time_of_day(&range.start).map_err(|_| MalformedReason::Unparsable {
        value: range.start.clone(),
    })?;
    let end = parse_time_of_day(&range.end).map_err(|_| MalformedReason::Unparsable {
        value: range.end.clone(),
    })?;
    Interval::new(date.and_time(start), date.and_time(end)).map_err(|_| MalformedReason::NotIncreasing)
}

/// Parse a wall-clock time.
///
/// Short strings such as `9:00` or `16:30` are read as `H:MM`. Anything longer
/// is tried as a full time of day (`HH:MM:SS`, optional fraction) and then as
/// an ISO date-time whose time part is kept. A trailing `Z` or `+HH:MM` /
/// `-HHMM` offset is accepted and ignored: the wall-clock part is used as is.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    let invalid = || ScheduleError::InvalidTime(value.to_string());
    let local = strip_utc_offset(value);

    if local.contains(':') && local.chars().count() <= 5 {
        let (hours, minutes) = local.split_once(':').ok_or_else(invalid)?;
        let hours: u32 = hours.parse().map_err(|_| invalid())?;
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        return NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid);
    }

    if let Ok(time) = NaiveTime::parse_from_str(local, "%H:%M:%S%.f") {
        return Ok(time);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(local, format) {
            return Ok(datetime.time());
        }
    }

    Err(invalid())
}

/// Drop a trailing `Z`, `±HH:MM` or `±HHMM` designator from a time string.
/// Only strips when what remains still carries a `:` time separator, so a
/// bare date such as `2026-03-16` is left alone.
fn strip_utc_offset(value: &str) -> &str {
    if let Some(head) = value.strip_suffix(['Z', 'z']) {
        return head;
    }
    let bytes = value.as_bytes();
    let is_sign = |b: u8| b == b'+' || b == b'-';
    let digits = |range: &[u8]| range.iter().all(u8::is_ascii_digit);

    for (width, has_colon) in [(6, true), (5, false)] {
        if bytes.len() <= width {
            continue;
        }
        let split = bytes.len() - width;
        let tail = &bytes[split..];
        let shaped = if has_colon {
            is_sign(tail[0]) && digits(&tail[1..3]) && tail[3] == b':' && digits(&tail[4..])
        } else {
            is_sign(tail[0]) && digits(&tail[1..])
        };
        // The sign byte is ASCII, so `split` is a char boundary.
        if shaped && value[..split].contains(':') {
            return &value[..split];
        }
    }
    value
}
