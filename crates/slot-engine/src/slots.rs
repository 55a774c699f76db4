//! Discretize free intervals into bookable candidate slots.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::interval::Interval;

/// A generated slot of exactly the requested duration, not yet booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration_minutes: i64,
}

impl CandidateSlot {
    fn from_interval(interval: Interval) -> Self {
        Self {
            start: interval.start(),
            end: interval.end(),
            duration_minutes: interval.duration_minutes(),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn interval(&self) -> Interval {
        Interval::from_ordered(self.start, self.end)
    }
}

/// Walk a cursor through each free interval and emit `(cursor, cursor + duration)`
/// while it still fits, advancing by `step` each time.
///
/// With `step < duration` consecutive candidates overlap each other; that is
/// how callers get finer-grained start times. A slot shorter than `duration`
/// is never produced.
///
/// # Errors
/// Returns `ScheduleError::NonPositiveDuration` if `duration` or `step` is not
/// strictly positive.
pub fn generate_slots(
    free: &[Interval],
    duration: Duration,
    step: Duration,
) -> Result<Vec<CandidateSlot>> {
    if duration <= Duration::zero() {
        return Err(ScheduleError::NonPositiveDuration {
            what: "duration",
            minutes: duration.num_minutes(),
        });
    }
    if step <= Duration::zero() {
        return Err(ScheduleError::NonPositiveDuration {
            what: "step",
            minutes: step.num_minutes(),
        });
    }

    let mut slots = Vec::new();
    for window in free {
        let mut cursor = window.start();
        while let Some(slot_end) = cursor.checked_add_signed(duration) {
            if slot_end > window.end() {
                break;
            }
            slots.push(CandidateSlot::from_interval(Interval::from_ordered(cursor, slot_end)));
            match cursor.checked_add_signed(step) {
                Some(next) => cursor = next,
                None => break,
            }
        }
    }
    Ok(slots)
}
