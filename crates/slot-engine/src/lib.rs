//! # slot-engine
//!
//! Finds meeting slots that suit every participant and validates bookings.
//!
//! Each participant has a recurring weekly availability pattern. For a target
//! date the engine expands every pattern into concrete intervals, intersects
//! them across participants, cuts the shared free time into slots of a fixed
//! duration and drops the slots that collide with existing bookings. The same
//! rules decide whether a single proposed booking may be created.
//!
//! All instants are naive local date-times; there is no timezone handling.
//!
//! ## Modules
//!
//! - [`expander`] — weekly pattern + date → concrete intervals
//! - [`intersect`] — intervals where all participants are free
//! - [`slots`] — free intervals → fixed-duration candidate slots
//! - [`conflict`] — collisions with existing bookings
//! - [`validator`] — accept/reject one proposed booking
//! - [`repository`] — storage contracts and an in-memory store
//! - [`scheduler`] — entry points wiring the above to the repositories
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod expander;
pub mod interval;
pub mod intersect;
pub mod model;
pub mod repository;
pub mod schedule;
pub mod scheduler;
pub mod slots;
pub mod validator;
pub mod weekday;

pub use conflict::{filter_conflicting, find_conflict, find_conflicts, Conflict};
pub use error::{RepositoryError, ScheduleError, SchedulerError};
pub use expander::{expand_availability, expand_day, DayExpansion, MalformedRange};
pub use interval::Interval;
pub use intersect::intersect_all;
pub use model::{Booking, Participant, ParticipantId, ParticipantSet, SlotRequest};
pub use repository::{BookingRepository, InMemoryStore, ParticipantRepository, StoreSnapshot};
pub use schedule::{DayAvailability, TimeRange, WeeklyAvailability};
pub use scheduler::{BookingDecision, NewBooking, Scheduler};
pub use slots::{generate_slots, CandidateSlot};
pub use validator::{validate_booking, ValidationOutcome};
pub use weekday::Weekday;
