//! Weekly timetable: ordered day -> slot list mapping.
//!
//! # Invariants
//! - Day order is insertion order and survives JSON round-trips.
//! - Day names are unique.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Formatter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableDay {
    pub day: String,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    days: Vec<TimetableDay>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a timetable from `(day, slots)` pairs; later duplicates replace earlier ones.
    pub fn from_days<I, D, S>(days: I) -> Self
    where
        I: IntoIterator<Item = (D, Vec<S>)>,
        D: Into<String>,
        S: Into<String>,
    {
        let mut timetable = Self::new();
        for (day, slots) in days {
            timetable.set_day(day, slots.into_iter().map(Into::into).collect());
        }
        timetable
    }

    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.days.iter().map(|entry| entry.day.as_str())
    }

    pub fn entries(&self) -> &[TimetableDay] {
        &self.days
    }

    pub fn slots(&self, day: &str) -> Option<&[String]> {
        self.days
            .iter()
            .find(|entry| entry.day == day)
            .map(|entry| entry.slots.as_slice())
    }

    /// Appends one slot to an existing day. Returns `false` for unknown days.
    pub fn push_slot(&mut self, day: &str, slot: impl Into<String>) -> bool {
        match self.days.iter_mut().find(|entry| entry.day == day) {
            Some(entry) => {
                entry.slots.push(slot.into());
                true
            }
            None => false,
        }
    }

    fn set_day(&mut self, day: impl Into<String>, slots: Vec<String>) {
        let day = day.into();
        match self.days.iter_mut().find(|entry| entry.day == day) {
            Some(entry) => entry.slots = slots,
            None => self.days.push(TimetableDay { day, slots }),
        }
    }
}

impl Serialize for Timetable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for entry in &self.days {
            map.serialize_entry(&entry.day, &entry.slots)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Timetable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TimetableVisitor)
    }
}

struct TimetableVisitor;

impl<'de> Visitor<'de> for TimetableVisitor {
    type Value = Timetable;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a map of day names to slot lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut timetable = Timetable::new();
        while let Some((day, slots)) = access.next_entry::<String, Vec<String>>()? {
            timetable.set_day(day, slots);
        }
        Ok(timetable)
    }
}
