//! Subject domain model.

use super::validation::{is_blank, RecordValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// Taught subject, referenced by `code` from timetable and attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub code: String,
    pub name: String,
}

impl Subject {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Checks that code and name are non-blank.
    pub fn validate(&self) -> ValidationResult {
        if is_blank(&self.code) {
            return Err(RecordValidationError::EmptySubjectCode);
        }
        if is_blank(&self.name) {
            return Err(RecordValidationError::EmptySubjectName);
        }
        Ok(())
    }
}
