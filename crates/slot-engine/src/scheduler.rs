//! Entry points that fetch from the repositories and run the engine.
//!
//! Slot discovery: expand each participant's week on the date, intersect,
//! discretize, then drop slots that collide with existing bookings.
//! Booking creation: validate, then write through the repository, whose
//! `create` re-checks overlaps under its own lock.
//!
//! Nothing is cached between calls; every call re-reads its inputs.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::conflict::{filter_conflicting, find_conflict};
use crate::error::{RepositoryError, SchedulerError};
use crate::expander::expand_day;
use crate::interval::Interval;
use crate::intersect::intersect_all;
use crate::model::{Booking, Participant, ParticipantId, ParticipantSet, SlotRequest};
use crate::repository::{BookingRepository, ParticipantRepository};
use crate::slots::{generate_slots, CandidateSlot};
use crate::validator::{validate_booking, ValidationOutcome};

pub type Result<T> = std::result::Result<T, SchedulerError>;

/// A booking the caller wants to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub participants: ParticipantSet,
    pub interval: Interval,
    pub title: String,
    pub description: String,
}

impl NewBooking {
    pub fn new(participants: ParticipantSet, interval: Interval) -> Self {
        Self {
            participants,
            interval,
            title: String::new(),
            description: String::new(),
        }
    }
}

/// What happened to a [`NewBooking`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "detail", rename_all = "camelCase")]
pub enum BookingDecision {
    Created(Booking),
    Rejected(ValidationOutcome),
}

/// Scheduling operations over injected repositories.
pub struct Scheduler<'a, P, B> {
    participants: &'a P,
    bookings: &'a B,
}

impl<'a, P, B> Scheduler<'a, P, B>
where
    P: ParticipantRepository,
    B: BookingRepository,
{
    pub fn new(participants: &'a P, bookings: &'a B) -> Self {
        Self {
            participants,
            bookings,
        }
    }

    /// Slots of `request.duration`, starting every `request.step` within the
    /// common free time of all participants, that no existing booking of
    /// theirs overlaps.
    ///
    /// # Errors
    /// `ParticipantNotFound` if any id is unknown, `Schedule` for a
    /// non-positive duration or step, `Repository` for storage failures.
    pub fn find_slots(&self, request: &SlotRequest) -> Result<Vec<CandidateSlot>> {
        // Reject a bad duration/step before touching storage.
        generate_slots(&[], request.duration, request.step)?;

        let mut per_participant = Vec::with_capacity(request.participants.len());
        for id in &request.participants {
            let participant = self
                .resolve(id)?
                .ok_or_else(|| SchedulerError::ParticipantNotFound(id.clone()))?;
            let expansion = expand_day(&participant.availability, request.date);
            tracing::debug!(
                participant = %id,
                windows = expansion.intervals.len(),
                skipped = expansion.diagnostics.len(),
                "expanded availability"
            );
            per_participant.push(expansion.intervals);
        }

        let free = intersect_all(&per_participant);
        if free.is_empty() {
            tracing::debug!(date = %request.date, "no common availability");
            return Ok(Vec::new());
        }

        let candidates = generate_slots(&free, request.duration, request.step)?;
        let existing = self.bookings.list_by_participants(&request.participants)?;
        let slots = filter_conflicting(candidates, &request.participants, &existing);
        tracing::debug!(
            date = %request.date,
            free_windows = free.len(),
            bookings = existing.len(),
            slots = slots.len(),
            "slot search finished"
        );
        Ok(slots)
    }

    /// Validate a proposed booking without persisting it.
    ///
    /// Only collaborator failures are returned as `Err`; every business
    /// rejection is a [`ValidationOutcome`].
    pub fn validate_booking(
        &self,
        participants: &ParticipantSet,
        interval: &Interval,
    ) -> Result<ValidationOutcome> {
        let mut resolved: BTreeMap<ParticipantId, Participant> = BTreeMap::new();
        for id in participants {
            if let Some(participant) = self.resolve(id)? {
                resolved.insert(id.clone(), participant);
            }
        }
        let existing = self.bookings.list_by_participants(participants)?;
        Ok(validate_booking(
            participants,
            interval,
            |id| resolved.get(id),
            &existing,
        ))
    }

    /// Validate and, when accepted, persist a new booking under a fresh id.
    pub fn create_booking(&self, request: NewBooking) -> Result<BookingDecision> {
        let outcome = self.validate_booking(&request.participants, &request.interval)?;
        if !outcome.is_accepted() {
            return Ok(BookingDecision::Rejected(outcome));
        }

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            participants: request.participants,
            interval: request.interval,
            title: request.title,
            description: request.description,
        };

        match self.bookings.create(booking.clone()) {
            Ok(()) => {
                tracing::info!(booking = %booking.id, "booking created");
                Ok(BookingDecision::Created(booking))
            }
            Err(RepositoryError::Conflict { token }) => {
                tracing::warn!(%token, "booking lost a race with a concurrent write");
                let existing = self.bookings.list_by_participants(&booking.participants)?;
                match find_conflict(&booking.interval, &booking.participants, &existing) {
                    Some(conflict) => Ok(BookingDecision::Rejected(ValidationOutcome::RejectedConflict {
                        booking: conflict.booking,
                        overlap_minutes: conflict.overlap_minutes,
                    })),
                    None => Err(RepositoryError::Conflict { token }.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Existing bookings involving any of `participants`.
    pub fn bookings_for(&self, participants: &ParticipantSet) -> Result<Vec<Booking>> {
        Ok(self.bookings.list_by_participants(participants)?)
    }

    pub fn cancel_booking(&self, id: &str) -> Result<Booking> {
        let removed = self.bookings.delete(id)?;
        tracing::info!(booking = %removed.id, "booking cancelled");
        Ok(removed)
    }

    /// `Ok(None)` for an unknown id; other repository failures propagate.
    fn resolve(&self, id: &ParticipantId) -> Result<Option<Participant>> {
        match self.participants.get(id) {
            Ok(participant) => Ok(Some(participant)),
            Err(RepositoryError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
