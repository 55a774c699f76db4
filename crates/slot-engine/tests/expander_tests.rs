//! Tests for weekly availability expansion.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slot_engine::expander::{expand_availability, expand_day, parse_time_of_day, MalformedReason};
use slot_engine::{DayAvailability, TimeRange, Weekday, WeeklyAvailability};

/// 2026-03-16 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn at(date: NaiveDate, hour: u32, min: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, min, 0).unwrap()
}

fn day(weekday: Weekday, ranges: &[(&str, &str)]) -> DayAvailability {
    DayAvailability {
        day: weekday,
        time_slots: ranges.iter().map(|(s, e)| TimeRange::new(*s, *e)).collect(),
    }
}

#[test]
fn matching_weekday_yields_anchored_interval() {
    let week = WeeklyAvailability::new(vec![day(Weekday::Monday, &[("08:00", "16:00")])]);

    let intervals = expand_availability(&week, monday());

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start(), at(monday(), 8, 0));
    assert_eq!(intervals[0].end(), at(monday(), 16, 0));
}

#[test]
fn no_entry_for_weekday_yields_nothing() {
    let week = WeeklyAvailability::new(vec![day(Weekday::Tuesday, &[("08:00", "16:00")])]);

    let expansion = expand_day(&week, monday());

    assert!(expansion.intervals.is_empty());
    assert!(expansion.diagnostics.is_empty());
}

#[test]
fn empty_schedule_yields_nothing() {
    assert!(expand_availability(&WeeklyAvailability::default(), monday()).is_empty());
}

#[test]
fn ranges_emitted_in_source_order_without_merging() {
    let week = WeeklyAvailability::new(vec![day(
        Weekday::Monday,
        &[("13:00", "17:00"), ("09:00", "12:00"), ("10:00", "11:00")],
    )]);

    let intervals = expand_availability(&week, monday());

    assert_eq!(intervals.len(), 3, "overlapping ranges are not merged");
    assert_eq!(intervals[0].start(), at(monday(), 13, 0));
    assert_eq!(intervals[1].start(), at(monday(), 9, 0));
    assert_eq!(intervals[2].start(), at(monday(), 10, 0));
}

#[test]
fn first_entry_for_weekday_wins() {
    let week = WeeklyAvailability::new(vec![
        day(Weekday::Monday, &[("09:00", "10:00")]),
        day(Weekday::Monday, &[("14:00", "15:00")]),
    ]);

    let intervals = expand_availability(&week, monday());

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start(), at(monday(), 9, 0));
}

#[test]
fn malformed_range_skipped_but_others_kept() {
    let week = WeeklyAvailability::new(vec![day(
        Weekday::Monday,
        &[("08:00", "10:00"), ("nine", "11:00"), ("", "12:00"), ("15:00", "14:00"), ("16:00", "17:00")],
    )]);

    let expansion = expand_day(&week, monday());

    assert_eq!(expansion.intervals.len(), 2);
    assert_eq!(expansion.intervals[0].start(), at(monday(), 8, 0));
    assert_eq!(expansion.intervals[1].start(), at(monday(), 16, 0));

    assert_eq!(expansion.diagnostics.len(), 3);
    assert_eq!(expansion.diagnostics[0].index, 1);
    assert_eq!(
        expansion.diagnostics[0].reason,
        MalformedReason::Unparsable {
            value: "nine".to_string()
        }
    );
    assert_eq!(expansion.diagnostics[1].reason, MalformedReason::MissingEndpoint);
    assert_eq!(expansion.diagnostics[2].reason, MalformedReason::NotIncreasing);
    assert_eq!(expansion.diagnostics[2].weekday, Weekday::Monday);
}

#[test]
fn full_time_strings_are_accepted() {
    let week = WeeklyAvailability::new(vec![day(
        Weekday::Monday,
        &[("09:30:00", "2026-01-01T11:45:00")],
    )]);

    let intervals = expand_availability(&week, monday());

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start(), at(monday(), 9, 30));
    assert_eq!(intervals[0].end(), at(monday(), 11, 45), "only the time part is used");
}

#[test]
fn parse_short_form_without_leading_zero() {
    assert_eq!(
        parse_time_of_day("9:05").unwrap(),
        NaiveTime::from_hms_opt(9, 5, 0).unwrap()
    );
}

#[test]
fn parse_rejects_out_of_range_clock() {
    assert!(parse_time_of_day("24:00").is_err());
    assert!(parse_time_of_day("12:60").is_err());
    assert!(parse_time_of_day("noon").is_err());
}

#[test]
fn parse_rfc3339_keeps_local_time() {
    assert_eq!(
        parse_time_of_day("2026-03-16T10:15:00+02:00").unwrap(),
        NaiveTime::from_hms_opt(10, 15, 0).unwrap()
    );
}

#[test]
fn parse_times_with_utc_designator_keep_wall_clock() {
    let half_nine = NaiveTime::from_hms_opt(9, 30, 0).unwrap();

    assert_eq!(parse_time_of_day("09:30:00Z").unwrap(), half_nine);
    assert_eq!(parse_time_of_day("09:30:00+02:00").unwrap(), half_nine);
    assert_eq!(
        parse_time_of_day("09:30:00.250-0330").unwrap(),
        half_nine + chrono::Duration::milliseconds(250)
    );
    assert_eq!(parse_time_of_day("09:30Z").unwrap(), half_nine);
    assert_eq!(parse_time_of_day("9:30+02:00").unwrap(), half_nine);
    assert_eq!(
        parse_time_of_day("2026-03-16T10:15:00-05:00").unwrap(),
        NaiveTime::from_hms_opt(10, 15, 0).unwrap()
    );
    assert_eq!(
        parse_time_of_day("2026-03-16T10:15Z").unwrap(),
        NaiveTime::from_hms_opt(10, 15, 0).unwrap()
    );
}

#[test]
fn parse_offset_errors_report_the_raw_value() {
    assert_eq!(
        parse_time_of_day("25:00Z"),
        Err(slot_engine::ScheduleError::InvalidTime("25:00Z".to_string()))
    );
    assert!(parse_time_of_day("Z").is_err());
    assert!(parse_time_of_day("+02:00").is_err());
}

#[test]
fn ranges_with_offsets_are_expanded() {
    let week = WeeklyAvailability::new(vec![day(
        Weekday::Monday,
        &[("09:00Z", "12:00Z"), ("13:00:00+01:00", "15:30:00+01:00")],
    )]);

    let expansion = expand_day(&week, monday());

    assert!(expansion.diagnostics.is_empty());
    assert_eq!(expansion.intervals.len(), 2);
    assert_eq!(expansion.intervals[0].start(), at(monday(), 9, 0));
    assert_eq!(expansion.intervals[0].end(), at(monday(), 12, 0));
    assert_eq!(expansion.intervals[1].start(), at(monday(), 13, 0));
    assert_eq!(expansion.intervals[1].end(), at(monday(), 15, 30));
}

#[test]
fn business_hours_cover_weekdays_only() {
    let week = WeeklyAvailability::business_hours();
    let saturday = NaiveDate::from_ymd_opt(2026, 3, 21).unwrap();
    let friday = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();

    assert!(expand_availability(&week, saturday).is_empty());
    let intervals = expand_availability(&week, friday);
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].duration_minutes(), 8 * 60);
}
