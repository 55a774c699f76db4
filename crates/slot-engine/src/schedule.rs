//! Recurring weekly availability as stored on a participant.
//!
//! Wire shape: `[{"day": 0, "timeSlots": [{"start": "08:00", "end": "16:00"}]}]`.
//! Time strings stay raw here; they are parsed during expansion so a single
//! bad entry cannot make the whole schedule unreadable.

use serde::{Deserialize, Serialize};

use crate::weekday::Weekday;

/// One wall-clock window, either `HH:MM` or a full time-of-day string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// The windows a participant is free on one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub day: Weekday,
    #[serde(default)]
    pub time_slots: Vec<TimeRange>,
}

/// A participant's weekly pattern. When a weekday appears more than once the
/// first entry is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability(pub Vec<DayAvailability>);

impl WeeklyAvailability {
    pub fn new(days: Vec<DayAvailability>) -> Self {
        Self(days)
    }

    /// Monday to Friday, 08:00–16:00. Assigned to participants created
    /// without an explicit schedule.
    pub fn business_hours() -> Self {
        Self(
            Weekday::ALL[..5]
                .iter()
                .map(|&day| DayAvailability {
                    day,
                    time_slots: vec![TimeRange::new("08:00", "16:00")],
                })
                .collect(),
        )
    }

    /// First entry for `day`, if any.
    pub fn for_day(&self, day: Weekday) -> Option<&DayAvailability> {
        self.0.iter().find(|d| d.day == day)
    }

    pub fn days(&self) -> &[DayAvailability] {
        &self.0
    }
}
