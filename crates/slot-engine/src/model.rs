//! Participants, participant sets, bookings and slot requests.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::interval::Interval;
use crate::schedule::WeeklyAvailability;

/// Opaque participant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A non-empty, deduplicated set of participants, iterated in id order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<ParticipantId>", into = "Vec<ParticipantId>")]
pub struct ParticipantSet(BTreeSet<ParticipantId>);

impl ParticipantSet {
    pub fn new<I, T>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<ParticipantId>,
    {
        let set: BTreeSet<ParticipantId> = ids.into_iter().map(Into::into).collect();
        if set.is_empty() {
            return Err(ScheduleError::EmptyParticipantSet);
        }
        Ok(Self(set))
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.0.contains(id)
    }

    /// True when the two sets have at least one participant in common.
    pub fn shares_any(&self, other: &ParticipantSet) -> bool {
        // Iterate the smaller set.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|id| large.contains(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticipantId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<ParticipantId>> for ParticipantSet {
    type Error = ScheduleError;

    fn try_from(ids: Vec<ParticipantId>) -> Result<Self> {
        ParticipantSet::new(ids)
    }
}

impl From<ParticipantSet> for Vec<ParticipantId> {
    fn from(set: ParticipantSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a ParticipantSet {
    type Item = &'a ParticipantId;
    type IntoIter = std::collections::btree_set::Iter<'a, ParticipantId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A person whose weekly availability constrains bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub availability: WeeklyAvailability,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            availability: WeeklyAvailability::business_hours(),
        }
    }

    pub fn with_availability(mut self, availability: WeeklyAvailability) -> Self {
        self.availability = availability;
        self
    }
}

/// A committed reservation of an interval for a set of participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookingRecord", into = "BookingRecord")]
pub struct Booking {
    pub id: String,
    pub participants: ParticipantSet,
    pub interval: Interval,
    pub title: String,
    pub description: String,
}

impl Booking {
    pub fn new(id: impl Into<String>, participants: ParticipantSet, interval: Interval) -> Self {
        Self {
            id: id.into(),
            participants,
            interval,
            title: String::new(),
            description: String::new(),
        }
    }
}

/// Flat wire form of a [`Booking`]. Accepts the older `personIds`,
/// `startTime` and `endTime` field names.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRecord {
    id: String,
    #[serde(alias = "personIds")]
    participant_ids: Vec<ParticipantId>,
    #[serde(alias = "startTime")]
    start: NaiveDateTime,
    #[serde(alias = "endTime")]
    end: NaiveDateTime,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

impl TryFrom<BookingRecord> for Booking {
    type Error = ScheduleError;

    fn try_from(record: BookingRecord) -> Result<Self> {
        Ok(Booking {
            id: record.id,
            participants: ParticipantSet::new(record.participant_ids)?,
            interval: Interval::new(record.start, record.end)?,
            title: record.title,
            description: record.description,
        })
    }
}

impl From<Booking> for BookingRecord {
    fn from(booking: Booking) -> Self {
        BookingRecord {
            id: booking.id,
            participant_ids: booking.participants.into(),
            start: booking.interval.start(),
            end: booking.interval.end(),
            title: booking.title,
            description: booking.description,
        }
    }
}

/// Everything needed to search for common slots on one date.
///
/// `step` is how far the cursor advances between candidate starts; there is
/// no implicit default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub participants: ParticipantSet,
    pub date: NaiveDate,
    pub duration: Duration,
    pub step: Duration,
}

impl SlotRequest {
    pub fn new(participants: ParticipantSet, date: NaiveDate, duration: Duration, step: Duration) -> Self {
        Self {
            participants,
            date,
            duration,
            step,
        }
    }

    /// Convenience constructor taking whole minutes.
    ///
    /// Fails with [`ScheduleError::DurationOutOfRange`] when a value does not
    /// fit a `chrono::Duration`. Sign checks happen later, in slot generation.
    pub fn minutes(
        participants: ParticipantSet,
        date: NaiveDate,
        duration_minutes: i64,
        step_minutes: i64,
    ) -> Result<Self> {
        Ok(Self::new(
            participants,
            date,
            whole_minutes("duration", duration_minutes)?,
            whole_minutes("step", step_minutes)?,
        ))
    }
}

fn whole_minutes(what: &'static str, minutes: i64) -> Result<Duration> {
    Duration::try_minutes(minutes).ok_or(ScheduleError::DurationOutOfRange { what, minutes })
}
