//! Storage contracts consumed by the scheduler, plus an in-memory store.
//!
//! The algorithms never touch storage. [`Scheduler`](crate::scheduler::Scheduler)
//! reads participants and bookings through these traits and writes accepted
//! bookings back through [`BookingRepository::create`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;
use crate::interval::Interval;
use crate::model::{Booking, Participant, ParticipantId, ParticipantSet};
use crate::schedule::WeeklyAvailability;

pub type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Read access to participants.
pub trait ParticipantRepository {
    /// Returns `RepositoryError::NotFound` when `id` is unknown.
    fn get(&self, id: &ParticipantId) -> RepoResult<Participant>;
}

/// Read and write access to bookings.
pub trait BookingRepository {
    /// Bookings that include at least one of `participants`.
    fn list_by_participants(&self, participants: &ParticipantSet) -> RepoResult<Vec<Booking>>;

    /// Persist a booking.
    ///
    /// Implementations must reject, with `RepositoryError::Conflict`, a booking
    /// that would overlap a stored booking sharing a participant. Validation
    /// and this write are not atomic, so this check is what prevents two
    /// concurrent requests from both landing.
    fn create(&self, booking: Booking) -> RepoResult<()>;

    fn delete(&self, id: &str) -> RepoResult<Booking>;
}

/// Canonical key for a reservation: sorted participant ids plus bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReservationToken(String);

impl ReservationToken {
    pub fn new(participants: &ParticipantSet, interval: &Interval) -> Self {
        let ids: Vec<&str> = participants.iter().map(ParticipantId::as_str).collect();
        Self(format!(
            "{}@{}/{}",
            ids.join(","),
            interval.start().format("%Y-%m-%dT%H:%M:%S"),
            interval.end().format("%Y-%m-%dT%H:%M:%S")
        ))
    }

    pub fn of(booking: &Booking) -> Self {
        Self::new(&booking.participants, &booking.interval)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serializable contents of an [`InMemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub people: Vec<Participant>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Default)]
struct StoreState {
    people: BTreeMap<ParticipantId, Participant>,
    bookings: Vec<Booking>,
}

/// Mutex-guarded store implementing both repository traits.
///
/// `create` checks for overlaps while holding the lock, which makes it the
/// per-store serialization point for validate-then-write.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let people = snapshot
            .people
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Self {
            state: Mutex::new(StoreState {
                people,
                bookings: snapshot.bookings,
            }),
        }
    }

    pub fn snapshot(&self) -> RepoResult<StoreSnapshot> {
        let state = self.lock()?;
        Ok(StoreSnapshot {
            people: state.people.values().cloned().collect(),
            bookings: state.bookings.clone(),
        })
    }

    /// Insert or replace a participant.
    pub fn insert_participant(&self, participant: Participant) -> RepoResult<()> {
        self.lock()?
            .people
            .insert(participant.id.clone(), participant);
        Ok(())
    }

    pub fn set_availability(
        &self,
        id: &ParticipantId,
        availability: WeeklyAvailability,
    ) -> RepoResult<Participant> {
        let mut state = self.lock()?;
        let participant = state
            .people
            .get_mut(id)
            .ok_or_else(|| participant_not_found(id))?;
        participant.availability = availability;
        Ok(participant.clone())
    }

    pub fn remove_participant(&self, id: &ParticipantId) -> RepoResult<Participant> {
        self.lock()?
            .people
            .remove(id)
            .ok_or_else(|| participant_not_found(id))
    }

    pub fn participants(&self) -> RepoResult<Vec<Participant>> {
        Ok(self.lock()?.people.values().cloned().collect())
    }

    pub fn all_bookings(&self) -> RepoResult<Vec<Booking>> {
        Ok(self.lock()?.bookings.clone())
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Storage("store lock poisoned".to_string()))
    }
}

fn participant_not_found(id: &ParticipantId) -> RepositoryError {
    RepositoryError::NotFound {
        entity: "participant",
        id: id.to_string(),
    }
}

impl ParticipantRepository for InMemoryStore {
    fn get(&self, id: &ParticipantId) -> RepoResult<Participant> {
        self.lock()?
            .people
            .get(id)
            .cloned()
            .ok_or_else(|| participant_not_found(id))
    }
}

impl BookingRepository for InMemoryStore {
    fn list_by_participants(&self, participants: &ParticipantSet) -> RepoResult<Vec<Booking>> {
        Ok(self
            .lock()?
            .bookings
            .iter()
            .filter(|b| b.participants.shares_any(participants))
            .cloned()
            .collect())
    }

    fn create(&self, booking: Booking) -> RepoResult<()> {
        let mut state = self.lock()?;
        let token = ReservationToken::of(&booking);
        let collides = state.bookings.iter().any(|existing| {
            existing.id == booking.id
                || ReservationToken::of(existing) == token
                || (existing.participants.shares_any(&booking.participants)
                    && existing.interval.overlaps(&booking.interval))
        });
        if collides {
            return Err(RepositoryError::Conflict {
                token: token.to_string(),
            });
        }
        state.bookings.push(booking);
        Ok(())
    }

    fn delete(&self, id: &str) -> RepoResult<Booking> {
        let mut state = self.lock()?;
        let index = state
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "booking",
                id: id.to_string(),
            })?;
        Ok(state.bookings.remove(index))
    }
}
