//! `slots` CLI — find common meeting slots and manage bookings stored in a
//! JSON snapshot file.
//!
//! ## Usage
//!
//! ```sh
//! # Hour-long slots on a Monday for two people, one start per hour
//! slots --data store.json find --people alice,bob --date 2026-03-16 --duration 60
//!
//! # Half-hour slots offered every 15 minutes
//! slots --data store.json find --people alice,bob --date 2026-03-16 --duration 30 --step 15
//!
//! # Check a booking without saving it
//! slots --data store.json check --people alice,bob --start 2026-03-16T09:30 --end 2026-03-16T10:30
//!
//! # Validate and save a booking
//! slots --data store.json book --people alice --start 2026-03-16T09:00 --end 2026-03-16T10:00 --title Sync
//!
//! # List bookings, cancel one
//! slots --data store.json list --people alice
//! slots --data store.json cancel --id 6f1c...
//!
//! # Show how a participant's week expands on a date
//! slots --data store.json expand --person alice --date 2026-03-16
//!
//! # Manage people (new people default to Mon-Fri 08:00-16:00)
//! slots --data store.json people add --name Alice --email alice@example.com
//! slots --data store.json people update --id 3f2a... --email alice@corp.example
//! slots --data store.json people remove --id 3f2a...
//!
//! # Read or replace someone's weekly availability
//! slots --data store.json availability get --person alice
//! slots --data store.json availability set --person alice --input week.json
//! ```
//!
//! Results are printed as JSON on stdout. A rejected booking exits with
//! status 2; any other failure exits with status 1.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::{
    expand_day, BookingDecision, InMemoryStore, Interval, NewBooking, Participant,
    ParticipantId, ParticipantRepository, ParticipantSet, Scheduler, SlotRequest, StoreSnapshot,
    WeeklyAvailability,
};
use uuid::Uuid;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit status for a booking rejected by validation.
const EXIT_REJECTED: i32 = 2;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find common meeting slots and validate bookings"
)]
struct Cli {
    /// JSON snapshot holding people and bookings
    #[arg(short, long, env = "SLOTS_DATA", global = true)]
    data: Option<PathBuf>,

    /// Log engine decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find slots when all listed people are free
    Find {
        /// Comma-separated participant ids
        #[arg(short, long, value_delimiter = ',', required = true)]
        people: Vec<String>,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Slot length in minutes
        #[arg(long, default_value_t = 30)]
        duration: i64,
        /// Minutes between candidate starts (defaults to the duration)
        #[arg(long)]
        step: Option<i64>,
    },
    /// Validate a booking without saving it
    Check {
        #[arg(short, long, value_delimiter = ',', required = true)]
        people: Vec<String>,
        /// Start (YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        start: String,
        /// End (YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        end: String,
    },
    /// Validate a booking and save it to the data file
    Book {
        #[arg(short, long, value_delimiter = ',', required = true)]
        people: Vec<String>,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List bookings, optionally only those involving the given people
    List {
        #[arg(short, long, value_delimiter = ',')]
        people: Vec<String>,
    },
    /// Delete a booking by id
    Cancel {
        #[arg(long)]
        id: String,
    },
    /// List, add, update or remove people
    People {
        #[command(subcommand)]
        action: PeopleAction,
    },
    /// Read or replace a person's weekly availability
    Availability {
        #[command(subcommand)]
        action: AvailabilityAction,
    },
    /// Show a participant's availability windows on a date
    Expand {
        #[arg(long)]
        person: String,
        #[arg(long)]
        date: String,
    },
}

#[derive(Subcommand)]
enum PeopleAction {
    /// List people in the data file
    List,
    /// Add a person under a fresh random id
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        /// JSON file with the weekly availability (Mon-Fri 08:00-16:00 when omitted)
        #[arg(long)]
        availability: Option<String>,
    },
    /// Change a person's name or email
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Remove a person
    Remove {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum AvailabilityAction {
    /// Print a person's weekly availability
    Get {
        #[arg(long)]
        person: String,
    },
    /// Replace a person's weekly availability
    Set {
        #[arg(long)]
        person: String,
        /// JSON file to read (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = cli
        .data
        .context("No data file given: pass --data or set SLOTS_DATA")?;
    let store = load_store(&path)?;
    let scheduler = Scheduler::new(&store, &store);

    match cli.command {
        Commands::Find {
            people,
            date,
            duration,
            step,
        } => {
            let request = SlotRequest::minutes(
                participant_set(&people)?,
                parse_date(&date)?,
                duration,
                step.unwrap_or(duration),
            )?;
            let slots = scheduler
                .find_slots(&request)
                .context("Failed to search for slots")?;
            print_json(&slots)?;
        }
        Commands::Check { people, start, end } => {
            let participants = participant_set(&people)?;
            let interval = parse_interval(&start, &end)?;
            let outcome = scheduler
                .validate_booking(&participants, &interval)
                .context("Failed to validate booking")?;
            print_json(&outcome)?;
            if let Some(reason) = outcome.reason() {
                eprintln!("Rejected: {}", reason);
                process::exit(EXIT_REJECTED);
            }
        }
        Commands::Book {
            people,
            start,
            end,
            title,
            description,
        } => {
            let request = NewBooking {
                participants: participant_set(&people)?,
                interval: parse_interval(&start, &end)?,
                title,
                description,
            };
            let decision = scheduler
                .create_booking(request)
                .context("Failed to create booking")?;
            match &decision {
                BookingDecision::Created(booking) => {
                    save_store(&path, &store)?;
                    print_json(booking)?;
                }
                BookingDecision::Rejected(outcome) => {
                    print_json(outcome)?;
                    if let Some(reason) = outcome.reason() {
                        eprintln!("Rejected: {}", reason);
                    }
                    process::exit(EXIT_REJECTED);
                }
            }
        }
        Commands::List { people } => {
            let bookings = if people.is_empty() {
                store.all_bookings()?
            } else {
                scheduler.bookings_for(&participant_set(&people)?)?
            };
            print_json(&bookings)?;
        }
        Commands::Cancel { id } => {
            let removed = scheduler
                .cancel_booking(&id)
                .with_context(|| format!("Failed to cancel booking {}", id))?;
            save_store(&path, &store)?;
            print_json(&removed)?;
        }
        Commands::People { action } => run_people(action, &path, &store)?,
        Commands::Availability { action } => match action {
            AvailabilityAction::Get { person } => {
                let participant = store
                    .get(&ParticipantId::new(person))
                    .context("Failed to look up participant")?;
                print_json(&participant.availability)?;
            }
            AvailabilityAction::Set { person, input } => {
                let availability = parse_availability(&read_input(input.as_deref())?)?;
                let updated = store
                    .set_availability(&ParticipantId::new(person), availability)
                    .context("Failed to update availability")?;
                save_store(&path, &store)?;
                print_json(&updated.availability)?;
            }
        },
        Commands::Expand { person, date } => {
            let participant = store
                .get(&ParticipantId::new(person))
                .context("Failed to look up participant")?;
            let expansion = expand_day(&participant.availability, parse_date(&date)?);
            print_json(&ExpandView {
                intervals: expansion.intervals,
                skipped: expansion.diagnostics,
            })?;
        }
    }

    Ok(())
}

fn run_people(action: PeopleAction, path: &Path, store: &InMemoryStore) -> Result<()> {
    match action {
        PeopleAction::List => print_json(&store.participants()?),
        PeopleAction::Add {
            name,
            email,
            availability,
        } => {
            let mut participant = Participant::new(Uuid::new_v4().to_string(), name);
            participant.email = email;
            if let Some(file) = availability {
                let raw = read_input(Some(file.as_str()))?;
                participant.availability = parse_availability(&raw)?;
            }
            store.insert_participant(participant.clone())?;
            save_store(path, store)?;
            print_json(&participant)
        }
        PeopleAction::Update { id, name, email } => {
            let mut participant = store
                .get(&ParticipantId::new(id))
                .context("Failed to look up participant")?;
            if let Some(name) = name {
                participant.name = name;
            }
            if let Some(email) = email {
                participant.email = email;
            }
            store.insert_participant(participant.clone())?;
            save_store(path, store)?;
            print_json(&participant)
        }
        PeopleAction::Remove { id } => {
            let removed = store
                .remove_participant(&ParticipantId::new(id.as_str()))
                .with_context(|| format!("Failed to remove participant {}", id))?;
            save_store(path, store)?;
            print_json(&removed)
        }
    }
}

#[derive(Serialize)]
struct ExpandView {
    intervals: Vec<Interval>,
    skipped: Vec<slot_engine::MalformedRange>,
}

/// Log to stderr so stdout stays parseable JSON.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "slot_engine=debug,info"
    } else {
        "slot_engine=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn load_store(path: &Path) -> Result<InMemoryStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    let snapshot: StoreSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))?;
    tracing::debug!(
        people = snapshot.people.len(),
        bookings = snapshot.bookings.len(),
        "loaded data file"
    );
    Ok(InMemoryStore::from_snapshot(snapshot))
}

fn save_store(path: &Path, store: &InMemoryStore) -> Result<()> {
    let snapshot = store.snapshot()?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write data file: {}", path.display()))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_availability(raw: &str) -> Result<WeeklyAvailability> {
    serde_json::from_str(raw).context("Failed to parse weekly availability JSON")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn participant_set(ids: &[String]) -> Result<ParticipantSet> {
    let ids = ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(ParticipantId::from);
    Ok(ParticipantSet::new(ids)?)
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

fn parse_instant(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .with_context(|| format!("Invalid date-time '{}', expected YYYY-MM-DDTHH:MM", value))
}

fn parse_interval(start: &str, end: &str) -> Result<Interval> {
    Ok(Interval::new(parse_instant(start)?, parse_instant(end)?)?)
}
