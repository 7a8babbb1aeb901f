//! Student domain model.
//!
//! # Invariants
//! - `id` is non-empty and alphanumeric.
//! - `name` and `roll_no` are non-empty after trim.
//! - Uniqueness of `id` and `roll_no` is enforced by the service, not here.

use super::validation::{is_alphanumeric_id, is_blank, RecordValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// Enrolled student. Immutable once added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Stable identifier used as attendance foreign key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Class roll number, unique across students.
    pub roll_no: String,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        roll_no: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            roll_no: roll_no.into(),
        }
    }

    /// Checks field-level constraints.
    ///
    /// Emptiness is checked before the id pattern, so a blank id reports
    /// `EmptyStudentId` rather than `StudentIdNotAlphanumeric`.
    pub fn validate(&self) -> ValidationResult {
        if is_blank(&self.id) {
            return Err(RecordValidationError::EmptyStudentId);
        }
        if is_blank(&self.name) {
            return Err(RecordValidationError::EmptyStudentName);
        }
        if is_blank(&self.roll_no) {
            return Err(RecordValidationError::EmptyRollNo);
        }
        if !is_alphanumeric_id(&self.id) {
            return Err(RecordValidationError::StudentIdNotAlphanumeric(
                self.id.clone(),
            ));
        }
        Ok(())
    }
}
