// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// One of the eight semantic attributes every catalog row is normalized to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Course,
    Term,
    Section,
    Instructor,
    Units,
    Days,
    Time,
    Location,
}

impl Field {
    /// All fields, in canonical order.
    pub const ALL: [Field; 8] = [
        Field::Course,
        Field::Term,
        Field::Section,
        Field::Instructor,
        Field::Units,
        Field::Days,
        Field::Time,
        Field::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Course => "course",
            Field::Term => "term",
            Field::Section => "section",
            Field::Instructor => "instructor",
            Field::Units => "units",
            Field::Days => "days",
            Field::Time => "time",
            Field::Location => "location",
        }
    }

    /// Match a header cell against the canonical names, ignoring case and
    /// surrounding whitespace.
    pub fn from_header(name: &str) -> Option<Self> {
        let name = name.trim();
        Field::ALL
            .into_iter()
            .find(|f| name.eq_ignore_ascii_case(f.as_str()))
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// A course row in canonical form.
///
/// Missing fields default to the empty string, both when normalizing a
/// source row and when decoding a persisted cart written by older pages.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default, Hash)]
#[serde(default)]
pub struct CanonicalRecord {
    pub course: String,
    pub term: String,
    pub section: String,
    pub instructor: String,
    pub units: String,
    pub days: String,
    pub time: String,
    pub location: String,
}

impl CanonicalRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Course => &self.course,
            Field::Term => &self.term,
            Field::Section => &self.section,
            Field::Instructor => &self.instructor,
            Field::Units => &self.units,
            Field::Days => &self.days,
            Field::Time => &self.time,
            Field::Location => &self.location,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Course => &mut self.course,
            Field::Term => &mut self.term,
            Field::Section => &mut self.section,
            Field::Instructor => &mut self.instructor,
            Field::Units => &mut self.units,
            Field::Days => &mut self.days,
            Field::Time => &mut self.time,
            Field::Location => &mut self.location,
        };
        *slot = value.into();
    }

    /// True if this record identifies the given `(course, section)` pair.
    /// Comparison is exact and case-sensitive.
    pub fn is_offering(&self, course: &str, section: &str) -> bool {
        self.course == course && self.section == section
    }
}
