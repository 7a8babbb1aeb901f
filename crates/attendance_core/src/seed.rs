//! Demo data set for smoke runs and manual testing.
//!
//! Seeding is re-runnable: records that already exist are skipped.

use crate::model::schedule::TimetableEntry;
use crate::model::student::Student;
use crate::model::subject::Subject;
use crate::service::error::{RecordResult, RecordServiceError};
use crate::service::record_service::RecordService;
use crate::store::Store;
use chrono::{NaiveDate, Weekday};
use log::{info, warn};

const SUBJECTS: &[(&str, &str)] = &[
    ("CS101", "Core Java"),
    ("MAT101", "Calculus"),
    ("PHY101", "Physics"),
    ("ENG101", "English"),
];

const STUDENTS: &[(&str, &str, &str)] = &[
    ("S001", "Alice Smith", "101"),
    ("S002", "Bob Jones", "102"),
    ("S003", "Charlie Brown", "103"),
    ("S006", "Yajnesh", "1208"),
    ("S007", "Shreeyas", "1165"),
    ("S008", "Sheldon", "1179"),
    ("S009", "Aaryan", "1209"),
];

const TIMETABLE: &[(Weekday, u32, &str)] = &[
    (Weekday::Mon, 1, "CS101"),
    (Weekday::Mon, 2, "MAT101"),
    (Weekday::Mon, 3, "PHY101"),
    (Weekday::Tue, 1, "MAT101"),
    (Weekday::Tue, 2, "CS101"),
    (Weekday::Wed, 1, "ENG101"),
    (Weekday::Wed, 2, "PHY101"),
    (Weekday::Thu, 1, "CS101"),
    (Weekday::Thu, 2, "MAT101"),
    (Weekday::Fri, 1, "PHY101"),
    (Weekday::Fri, 2, "ENG101"),
];

/// (student id, subject code, slot, present)
const MARKS: &[(&str, &str, u32, bool)] = &[
    ("S006", "CS101", 1, true),
    ("S006", "MAT101", 2, true),
    ("S007", "CS101", 1, true),
    ("S007", "MAT101", 2, false),
    ("S008", "CS101", 1, false),
    ("S008", "MAT101", 2, false),
    ("S009", "CS101", 1, true),
    ("S009", "MAT101", 2, true),
];

/// Counts of records written by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub subjects: usize,
    pub students: usize,
    pub timetable: usize,
    pub marks: usize,
    pub skipped: usize,
}

/// Seeds subjects, students, a weekday timetable and sample marks on `day`.
///
/// Duplicate and validation failures are logged and skipped. Marks on a day
/// whose timetable disagrees with the sample subjects are skipped the same
/// way. Storage failures abort the run.
pub fn seed_demo_data<S: Store>(
    service: &RecordService<S>,
    day: NaiveDate,
) -> RecordResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    for &(code, name) in SUBJECTS {
        if tolerate(service.add_subject(Subject::new(code, name)), "subject", code)? {
            summary.subjects += 1;
        } else {
            summary.skipped += 1;
        }
    }

    for &(id, name, roll_no) in STUDENTS {
        if tolerate(service.add_student(Student::new(id, name, roll_no)), "student", id)? {
            summary.students += 1;
        } else {
            summary.skipped += 1;
        }
    }

    for &(weekday, slot, code) in TIMETABLE {
        let entry = TimetableEntry::new(weekday, slot, code);
        if tolerate(service.add_timetable_entry(entry), "timetable", code)? {
            summary.timetable += 1;
        } else {
            summary.skipped += 1;
        }
    }

    for &(student_id, code, slot, present) in MARKS {
        let result = service.mark_attendance(student_id, code, day, slot, present);
        if tolerate(result, "attendance", student_id)? {
            summary.marks += 1;
        } else {
            summary.skipped += 1;
        }
    }

    info!(
        "event=seed module=seed status=ok subjects={} students={} timetable={} marks={} skipped={}",
        summary.subjects, summary.students, summary.timetable, summary.marks, summary.skipped
    );
    Ok(summary)
}

/// `Ok(true)` when written, `Ok(false)` when skipped, `Err` on storage failure.
fn tolerate(result: RecordResult<()>, kind: &str, key: &str) -> RecordResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(err @ RecordServiceError::Storage(_)) => Err(err),
        Err(err) => {
            warn!("event=seed module=seed status=skipped kind={kind} key={key} reason={err}");
            Ok(false)
        }
    }
}
