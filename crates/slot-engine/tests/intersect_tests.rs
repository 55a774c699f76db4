//! Tests for multi-participant interval intersection.

use chrono::{NaiveDate, NaiveDateTime};
use slot_engine::intersect::{intersect_all, intersect_pair};
use slot_engine::Interval;

fn at(hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 16)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn iv(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Interval {
    Interval::new(at(start_hour, start_min), at(end_hour, end_min)).unwrap()
}

#[test]
fn two_participants_overlap_to_common_window() {
    // X: 08:00-16:00, Y: 09:00-12:00 → 09:00-12:00
    let x = vec![iv(8, 0, 16, 0)];
    let y = vec![iv(9, 0, 12, 0)];

    let common = intersect_all(&[x, y]);

    assert_eq!(common, vec![iv(9, 0, 12, 0)]);
}

#[test]
fn touching_intervals_do_not_intersect() {
    let x = vec![iv(8, 0, 10, 0)];
    let y = vec![iv(10, 0, 12, 0)];

    assert!(intersect_all(&[x, y]).is_empty());
}

#[test]
fn each_overlapping_pair_contributes() {
    // X has a morning and an afternoon block; Y spans both partially.
    let x = vec![iv(8, 0, 12, 0), iv(13, 0, 17, 0)];
    let y = vec![iv(11, 0, 14, 0)];

    let common = intersect_pair(&x, &y);

    assert_eq!(common, vec![iv(11, 0, 12, 0), iv(13, 0, 14, 0)]);
}

#[test]
fn participant_without_availability_vetoes_everything() {
    let x = vec![iv(8, 0, 16, 0)];
    let y: Vec<Interval> = vec![];
    let z = vec![iv(9, 0, 10, 0)];

    assert!(intersect_all(&[x, y, z]).is_empty());
}

#[test]
fn no_participants_means_no_free_time() {
    assert!(intersect_all(&[]).is_empty());
}

#[test]
fn single_participant_result_is_sorted() {
    let x = vec![iv(13, 0, 14, 0), iv(9, 0, 10, 0)];

    assert_eq!(intersect_all(&[x]), vec![iv(9, 0, 10, 0), iv(13, 0, 14, 0)]);
}

#[test]
fn three_participants_narrow_progressively() {
    let x = vec![iv(8, 0, 16, 0)];
    let y = vec![iv(9, 0, 15, 0)];
    let z = vec![iv(10, 30, 11, 30), iv(14, 0, 18, 0)];

    let common = intersect_all(&[x, y, z]);

    assert_eq!(common, vec![iv(10, 30, 11, 30), iv(14, 0, 15, 0)]);
}

#[test]
fn participant_order_does_not_matter() {
    let x = vec![iv(8, 0, 12, 0), iv(13, 0, 17, 0)];
    let y = vec![iv(9, 0, 14, 0)];
    let z = vec![iv(7, 0, 9, 30), iv(11, 0, 16, 0)];

    let forward = intersect_all(&[x.clone(), y.clone(), z.clone()]);
    let backward = intersect_all(&[z, y, x]);

    assert_eq!(forward, backward);
    assert_eq!(forward, vec![iv(9, 0, 9, 30), iv(11, 0, 12, 0), iv(13, 0, 14, 0)]);
}
