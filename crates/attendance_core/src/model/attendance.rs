//! Attendance record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Presence mark for one student in one slot on one date.
///
/// `(student_id, date, slot_number)` is the record key; `subject_code` is
/// carried data and may reference a subject that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: String,
    pub subject_code: String,
    pub date: NaiveDate,
    pub slot_number: u32,
    pub present: bool,
}

impl AttendanceRecord {
    pub fn new(
        student_id: impl Into<String>,
        subject_code: impl Into<String>,
        date: NaiveDate,
        slot_number: u32,
        present: bool,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            subject_code: subject_code.into(),
            date,
            slot_number,
            present,
        }
    }

    /// Returns whether this record has the key `(student_id, date, slot_number)`.
    pub fn has_key(&self, student_id: &str, date: NaiveDate, slot_number: u32) -> bool {
        self.student_id == student_id && self.date == date && self.slot_number == slot_number
    }
}
