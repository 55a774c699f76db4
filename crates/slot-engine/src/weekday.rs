//! Day-of-week numbering shared by every part of the engine.
//!
//! `0` is Monday and `6` is Sunday. On the wire a day may also be spelled out
//! by name; [`DayNames`] translates those names while deserializing and is not
//! consulted anywhere else.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// `0` for Monday through `6` for Sunday.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Weekday> {
        Self::ALL.get(n as usize).copied()
    }

    pub fn of(date: NaiveDate) -> Weekday {
        Self::from(date.weekday())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        // chrono numbers Monday as 0 as well.
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        f.write_str(name)
    }
}

/// Translation table from free-text day names to [`Weekday`].
///
/// Covers English full and short names plus the Polish names and
/// abbreviations that schedules entered through the web editor may contain.
/// Lookups are case-insensitive.
pub struct DayNames;

impl DayNames {
    const TABLE: &'static [(&'static str, Weekday)] = &[
        ("monday", Weekday::Monday),
        ("mon", Weekday::Monday),
        ("poniedziałek", Weekday::Monday),
        ("pn", Weekday::Monday),
        ("tuesday", Weekday::Tuesday),
        ("tue", Weekday::Tuesday),
        ("wtorek", Weekday::Tuesday),
        ("wt", Weekday::Tuesday),
        ("wednesday", Weekday::Wednesday),
        ("wed", Weekday::Wednesday),
        ("środa", Weekday::Wednesday),
        ("sr", Weekday::Wednesday),
        ("thursday", Weekday::Thursday),
        ("thu", Weekday::Thursday),
        ("czwartek", Weekday::Thursday),
        ("cz", Weekday::Thursday),
        ("friday", Weekday::Friday),
        ("fri", Weekday::Friday),
        ("piątek", Weekday::Friday),
        ("pt", Weekday::Friday),
        ("saturday", Weekday::Saturday),
        ("sat", Weekday::Saturday),
        ("sobota", Weekday::Saturday),
        ("sb", Weekday::Saturday),
        ("sunday", Weekday::Sunday),
        ("sun", Weekday::Sunday),
        ("niedziela", Weekday::Sunday),
        ("nd", Weekday::Sunday),
    ];

    pub fn lookup(name: &str) -> Option<Weekday> {
        let wanted = name.trim().to_lowercase();
        Self::TABLE
            .iter()
            .find(|(candidate, _)| *candidate == wanted)
            .map(|&(_, day)| day)
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(WeekdayVisitor)
    }
}

struct WeekdayVisitor;

impl Visitor<'_> for WeekdayVisitor {
    type Value = Weekday;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a day number 0..=6 (Monday = 0) or a day name")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Weekday, E> {
        u8::try_from(v)
            .ok()
            .and_then(Weekday::from_number)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Weekday, E> {
        u8::try_from(v)
            .ok()
            .and_then(Weekday::from_number)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Weekday, E> {
        if let Ok(n) = v.trim().parse::<u8>() {
            if let Some(day) = Weekday::from_number(n) {
                return Ok(day);
            }
        }
        DayNames::lookup(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}
