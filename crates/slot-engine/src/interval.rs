//! Half-open time intervals over naive local instants.
//!
//! Every comparison in the engine goes through [`Interval::overlaps`], which
//! uses the open test `a.start < b.end && b.start < a.end`. Intervals that only
//! touch (`a.end == b.start`) do NOT overlap, so back-to-back bookings are fine.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// A non-empty span of time, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawInterval {
    #[serde(alias = "startTime")]
    start: NaiveDateTime,
    #[serde(alias = "endTime")]
    end: NaiveDateTime,
}

impl TryFrom<RawInterval> for Interval {
    type Error = ScheduleError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Build an interval, rejecting `start >= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Caller guarantees `start < end`.
    pub(crate) fn from_ordered(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(start < end, "interval bounds out of order");
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Open overlap: shared endpoints do not count.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `other` lies entirely inside `self` (endpoints may coincide).
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The common part of two intervals, if their interiors intersect.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Interval::from_ordered(
            self.start.max(other.start),
            self.end.min(other.end),
        ))
    }

    /// Length of the common part in whole minutes, 0 when disjoint.
    pub fn overlap_minutes(&self, other: &Interval) -> i64 {
        self.intersection(other)
            .map(|i| i.duration_minutes())
            .unwrap_or(0)
    }
}
