//! Field validation for record write paths.

use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static STUDENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid student id regex"));

/// Validation failure for record input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyStudentId,
    EmptyStudentName,
    EmptyRollNo,
    /// Student id contains characters outside `[A-Za-z0-9]`.
    StudentIdNotAlphanumeric(String),
    EmptySubjectCode,
    EmptySubjectName,
    /// Attendance marked against a slot scheduled for another subject.
    ///
    /// `scheduled` and `attempted` carry subject display names when known,
    /// raw codes otherwise.
    TimetableMismatch {
        day: Weekday,
        slot_number: u32,
        scheduled: String,
        attempted: String,
    },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStudentId => write!(f, "student id cannot be empty"),
            Self::EmptyStudentName => write!(f, "student name cannot be empty"),
            Self::EmptyRollNo => write!(f, "roll number cannot be empty"),
            Self::StudentIdNotAlphanumeric(id) => {
                write!(f, "student id `{id}` must be alphanumeric")
            }
            Self::EmptySubjectCode => write!(f, "subject code cannot be empty"),
            Self::EmptySubjectName => write!(f, "subject name cannot be empty"),
            Self::TimetableMismatch {
                day,
                slot_number,
                scheduled,
                attempted,
            } => write!(
                f,
                "Timetable mismatch: slot {slot_number} on {} is scheduled for '{scheduled}', not '{attempted}'",
                weekday_label(*day)
            ),
        }
    }
}

impl Error for RecordValidationError {}

pub type ValidationResult = Result<(), RecordValidationError>;

/// Returns `true` when `value` is empty after trimming whitespace.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns `true` when `id` consists solely of ASCII letters and digits.
pub fn is_alphanumeric_id(id: &str) -> bool {
    STUDENT_ID_RE.is_match(id)
}

/// Upper-case English day name, e.g. `MONDAY`.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}
