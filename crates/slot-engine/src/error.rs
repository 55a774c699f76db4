//! Error types for slot-engine operations.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::model::ParticipantId;

/// Invalid input to one of the scheduling algorithms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("At least one participant is required")]
    EmptyParticipantSet,

    #[error("{what} must be positive, got {minutes} minutes")]
    NonPositiveDuration { what: &'static str, minutes: i64 },

    #[error("{what} of {minutes} minutes is out of range")]
    DurationOutOfRange { what: &'static str, minutes: i64 },

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Failure reported by a storage collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Reservation {token} collides with an existing booking")]
    Conflict { token: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Error surfaced by the [`Scheduler`](crate::scheduler::Scheduler) entry points.
///
/// Business rejections during booking validation are not errors; they come
/// back as [`ValidationOutcome`](crate::validator::ValidationOutcome) values.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Participant {0} not found")]
    ParticipantNotFound(ParticipantId),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Collaborator failure: {0}")]
    Repository(#[from] RepositoryError),
}
