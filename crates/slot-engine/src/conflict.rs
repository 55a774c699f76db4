//! Detect collisions between proposed intervals and committed bookings.
//!
//! Only bookings that share at least one participant with the request can
//! conflict; bookings for entirely different people never block. Adjacent
//! intervals (one ends exactly when the other starts) are NOT conflicts.

use serde::Serialize;

use crate::interval::Interval;
use crate::model::{Booking, ParticipantSet};
use crate::slots::CandidateSlot;

/// A booking that collides with a proposed interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub booking: Booking,
    pub overlap_minutes: i64,
}

/// Bookings sharing at least one participant with `participants`.
pub fn narrow_bookings<'a>(bookings: &'a [Booking], participants: &ParticipantSet) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|b| b.participants.shares_any(participants))
        .collect()
}

/// Drop every candidate that overlaps a booking of any requested participant.
///
/// Every call scans the narrowed bookings in full; there is no index.
pub fn filter_conflicting(
    candidates: Vec<CandidateSlot>,
    participants: &ParticipantSet,
    bookings: &[Booking],
) -> Vec<CandidateSlot> {
    let narrowed = narrow_bookings(bookings, participants);
    if narrowed.is_empty() {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|slot| {
            let interval = slot.interval();
            !narrowed.iter().any(|b| b.interval.overlaps(&interval))
        })
        .collect()
}

/// The first booking (in `bookings` order) that blocks `interval`, if any.
pub fn find_conflict(
    interval: &Interval,
    participants: &ParticipantSet,
    bookings: &[Booking],
) -> Option<Conflict> {
    bookings
        .iter()
        .filter(|b| b.participants.shares_any(participants))
        .find(|b| b.interval.overlaps(interval))
        .map(|b| Conflict {
            booking: b.clone(),
            overlap_minutes: b.interval.overlap_minutes(interval),
        })
}

/// Every booking that blocks `interval`, with the overlap of each.
///
/// Two intervals overlap when `a.start < b.end && b.start < a.end`; the overlap
/// is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(
    interval: &Interval,
    participants: &ParticipantSet,
    bookings: &[Booking],
) -> Vec<Conflict> {
    narrow_bookings(bookings, participants)
        .into_iter()
        .filter(|b| b.interval.overlaps(interval))
        .map(|b| Conflict {
            booking: b.clone(),
            overlap_minutes: b.interval.overlap_minutes(interval),
        })
        .collect()
}
