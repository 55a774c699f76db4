//! Accept or reject one proposed booking before it is persisted.
//!
//! The decision runs in a fixed order and stops at the first failure:
//!
//! 1. every participant id resolves to a participant;
//! 2. each participant has an availability window on the booking's date that
//!    fully contains the interval;
//! 3. no booking sharing a participant overlaps the interval.
//!
//! Rejections are ordinary values, not errors. Persisting an accepted booking
//! is up to the caller.

use serde::Serialize;

use crate::conflict::find_conflict;
use crate::expander::expand_availability;
use crate::interval::Interval;
use crate::model::{Booking, Participant, ParticipantId, ParticipantSet};

/// Outcome of validating one proposed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ValidationOutcome {
    Accepted,
    RejectedParticipantMissing {
        participant: ParticipantId,
    },
    RejectedAvailability {
        participant: ParticipantId,
    },
    #[serde(rename_all = "camelCase")]
    RejectedConflict {
        booking: Booking,
        overlap_minutes: i64,
    },
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }

    /// Human-facing explanation, `None` when accepted.
    pub fn reason(&self) -> Option<String> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::RejectedParticipantMissing { participant } => {
                Some(format!("Participant {participant} not found"))
            }
            ValidationOutcome::RejectedAvailability { participant } => Some(format!(
                "Participant {participant} is not available at this time according to their schedule"
            )),
            ValidationOutcome::RejectedConflict { booking, .. } => Some(format!(
                "Conflict with existing booking {} ({} to {})",
                booking.id,
                booking.interval.start(),
                booking.interval.end()
            )),
        }
    }
}

/// Decide whether `interval` can be booked for `participants`.
///
/// `lookup` resolves a participant id; `bookings` are the existing bookings,
/// which need not be pre-filtered.
pub fn validate_booking<'a, F>(
    participants: &ParticipantSet,
    interval: &Interval,
    mut lookup: F,
    bookings: &[Booking],
) -> ValidationOutcome
where
    F: FnMut(&ParticipantId) -> Option<&'a Participant>,
{
    let mut resolved = Vec::with_capacity(participants.len());
    for id in participants {
        match lookup(id) {
            Some(p) => resolved.push(p),
            None => {
                return ValidationOutcome::RejectedParticipantMissing {
                    participant: id.clone(),
                }
            }
        }
    }

    let date = interval.start().date();
    for participant in resolved {
        let windows = expand_availability(&participant.availability, date);
        if !windows.iter().any(|w| w.contains(interval)) {
            return ValidationOutcome::RejectedAvailability {
                participant: participant.id.clone(),
            };
        }
    }

    match find_conflict(interval, participants, bookings) {
        Some(conflict) => ValidationOutcome::RejectedConflict {
            booking: conflict.booking,
            overlap_minutes: conflict.overlap_minutes,
        },
        None => ValidationOutcome::Accepted,
    }
}
