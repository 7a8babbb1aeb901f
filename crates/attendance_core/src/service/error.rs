//! Error taxonomy for record service operations.

use crate::model::validation::{weekday_label, RecordValidationError};
use crate::store::StoreError;
use chrono::Weekday;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RecordResult<T> = Result<T, RecordServiceError>;

/// Uniqueness constraint that an insert would violate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateRecord {
    /// Another student already uses this id or roll number.
    Student { id: String, roll_no: String },
    Subject(String),
    /// The `(day, slot_number)` pair is already scheduled.
    TimetableSlot { day: Weekday, slot_number: u32 },
}

impl Display for DuplicateRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student { id, roll_no } => write!(
                f,
                "student with id `{id}` or roll number `{roll_no}` already exists"
            ),
            Self::Subject(code) => write!(f, "subject with code `{code}` already exists"),
            Self::TimetableSlot { day, slot_number } => write!(
                f,
                "timetable slot already occupied for {} slot {slot_number}",
                weekday_label(*day)
            ),
        }
    }
}

/// Flat failure category for callers that only dispatch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordErrorKind {
    Validation,
    Duplicate,
    NotFound,
    Storage,
}

/// Service error for record use-cases.
#[derive(Debug)]
pub enum RecordServiceError {
    /// Input is malformed or inconsistent with the timetable.
    Validation(RecordValidationError),
    /// Insert would violate a uniqueness constraint.
    Duplicate(DuplicateRecord),
    /// Referenced student does not exist.
    StudentNotFound(String),
    /// Persisting a collection failed; in-memory state is already mutated.
    Storage(StoreError),
}

impl RecordServiceError {
    pub fn kind(&self) -> RecordErrorKind {
        match self {
            Self::Validation(_) => RecordErrorKind::Validation,
            Self::Duplicate(_) => RecordErrorKind::Duplicate,
            Self::StudentNotFound(_) => RecordErrorKind::NotFound,
            Self::Storage(_) => RecordErrorKind::Storage,
        }
    }
}

impl Display for RecordServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate(duplicate) => write!(f, "{duplicate}"),
            Self::StudentNotFound(id) => write!(f, "student not found with id: {id}"),
            Self::Storage(err) => write!(f, "failed to persist records: {err}"),
        }
    }
}

impl Error for RecordServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Duplicate(_) | Self::StudentNotFound(_) => None,
        }
    }
}

impl From<RecordValidationError> for RecordServiceError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DuplicateRecord> for RecordServiceError {
    fn from(value: DuplicateRecord) -> Self {
        Self::Duplicate(value)
    }
}

impl From<StoreError> for RecordServiceError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}
