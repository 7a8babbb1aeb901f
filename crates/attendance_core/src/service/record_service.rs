//! Record management use-case service.
//!
//! # Responsibility
//! - Own the five in-memory collections loaded from a `Store`.
//! - Validate input and enforce cross-collection invariants on every write.
//! - Persist the full affected collection after every mutation.
//! - Answer attendance queries from the in-memory state.
//!
//! # Invariants
//! - Student id and roll number are unique across students.
//! - Subject code is unique across subjects.
//! - `(day, slot_number)` is unique across timetable entries.
//! - `(student_id, date, slot_number)` is unique across attendance records.
//! - Removing a student removes their attendance; removing a subject removes
//!   its timetable entries only.
//! - One lock guards the store and all collections; callers never observe a
//!   partially applied mutation.
//!
//! Writes are not transactional across collections. A failed save leaves the
//! in-memory mutation applied, and a cascade whose second save fails leaves
//! the persisted collections diverged until the next successful save.

use crate::model::attendance::AttendanceRecord;
use crate::model::schedule::{TimeSlot, TimetableEntry};
use crate::model::student::Student;
use crate::model::subject::Subject;
use crate::model::validation::RecordValidationError;
use crate::service::error::{DuplicateRecord, RecordResult, RecordServiceError};
use crate::service::report::presence_percentage;
use crate::store::{load_collection, save_collection, Collection, Store, StoreResult};
use chrono::{Datelike, NaiveDate, Weekday};
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Collections {
    students: Vec<Student>,
    attendance: Vec<AttendanceRecord>,
    subjects: Vec<Subject>,
    time_slots: Vec<TimeSlot>,
    timetable: Vec<TimetableEntry>,
}

impl Collections {
    fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    fn subject(&self, code: &str) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.code == code)
    }

    /// Subject display name, falling back to the raw code.
    fn subject_label(&self, code: &str) -> String {
        self.subject(code)
            .map_or_else(|| code.to_string(), |subject| subject.name.clone())
    }

    fn scheduled(&self, day: Weekday, slot_number: u32) -> Option<&TimetableEntry> {
        self.timetable
            .iter()
            .find(|entry| entry.occupies(day, slot_number))
    }

    fn percentage(&self, student_id: &str) -> f64 {
        presence_percentage(
            self.attendance
                .iter()
                .filter(|record| record.student_id == student_id),
        )
    }

    fn percentage_by_subject(&self, student_id: &str, subject_code: &str) -> f64 {
        presence_percentage(self.attendance.iter().filter(|record| {
            record.student_id == student_id && record.subject_code == subject_code
        }))
    }

    fn attendance_where(&self, keep: impl Fn(&AttendanceRecord) -> bool) -> Vec<AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|record| keep(*record))
            .cloned()
            .collect()
    }
}

struct Inner<S> {
    store: S,
    records: Collections,
}

impl<S: Store> Inner<S> {
    /// Overwrites the persisted copy of `collection` with the in-memory one.
    fn persist(&mut self, collection: Collection) -> StoreResult<()> {
        let Self { store, records } = self;
        let result = match collection {
            Collection::Students => save_collection(store, collection, &records.students),
            Collection::Attendance => save_collection(store, collection, &records.attendance),
            Collection::Subjects => save_collection(store, collection, &records.subjects),
            Collection::TimeSlots => save_collection(store, collection, &records.time_slots),
            Collection::Timetable => save_collection(store, collection, &records.timetable),
        };
        if let Err(err) = &result {
            error!(
                "event=collection_save module=service status=error collection={} error={}",
                collection, err
            );
        }
        result
    }
}

/// Record service facade over a collection store.
pub struct RecordService<S: Store> {
    inner: Mutex<Inner<S>>,
}

impl<S: Store> RecordService<S> {
    /// Loads all collections from `store`.
    ///
    /// When the stored time slot list is empty, the default day is seeded
    /// and persisted before returning.
    pub fn open(store: S) -> RecordResult<Self> {
        let records = Collections {
            students: load_collection(&store, Collection::Students)?,
            attendance: load_collection(&store, Collection::Attendance)?,
            subjects: load_collection(&store, Collection::Subjects)?,
            time_slots: load_collection(&store, Collection::TimeSlots)?,
            timetable: load_collection(&store, Collection::Timetable)?,
        };
        let mut inner = Inner { store, records };

        if inner.records.time_slots.is_empty() {
            inner.records.time_slots = TimeSlot::default_day();
            inner.persist(Collection::TimeSlots)?;
            info!(
                "event=timeslots_seed module=service status=ok count={}",
                inner.records.time_slots.len()
            );
        }

        info!(
            "event=service_open module=service status=ok students={} subjects={} timetable={} attendance={}",
            inner.records.students.len(),
            inner.records.subjects.len(),
            inner.records.timetable.len(),
            inner.records.attendance.len()
        );

        Ok(Self {
            inner: Mutex::new(inner),
        })
    }

    /// Consumes the service and returns its store.
    pub fn into_store(self) -> S {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .store
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        // Poisoning means another caller panicked; collections are still whole.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Students ---

    /// Adds a student after field and uniqueness checks.
    pub fn add_student(&self, student: Student) -> RecordResult<()> {
        student.validate()?;

        let mut inner = self.lock();
        let exists = inner
            .records
            .students
            .iter()
            .any(|existing| existing.id == student.id || existing.roll_no == student.roll_no);
        if exists {
            warn!(
                "event=student_add module=service status=rejected reason=duplicate student_id={}",
                student.id
            );
            return Err(DuplicateRecord::Student {
                id: student.id,
                roll_no: student.roll_no,
            }
            .into());
        }

        let student_id = student.id.clone();
        inner.records.students.push(student);
        inner.persist(Collection::Students)?;
        info!("event=student_add module=service status=ok student_id={student_id}");
        Ok(())
    }

    /// Removes a student and cascades to their attendance records.
    ///
    /// Students are persisted before attendance; if the second save fails
    /// the persisted attendance still holds the removed student's records.
    pub fn remove_student(&self, student_id: &str) -> RecordResult<()> {
        let mut inner = self.lock();
        let before = inner.records.students.len();
        inner.records.students.retain(|student| student.id != student_id);
        if inner.records.students.len() == before {
            return Err(RecordServiceError::StudentNotFound(student_id.to_string()));
        }

        let before = inner.records.attendance.len();
        inner
            .records
            .attendance
            .retain(|record| record.student_id != student_id);
        let cascaded = before - inner.records.attendance.len();

        inner.persist(Collection::Students)?;
        inner.persist(Collection::Attendance)?;
        info!(
            "event=student_remove module=service status=ok student_id={student_id} attendance_removed={cascaded}"
        );
        Ok(())
    }

    pub fn find_student_by_id(&self, student_id: &str) -> RecordResult<Student> {
        self.lock()
            .records
            .student(student_id)
            .cloned()
            .ok_or_else(|| RecordServiceError::StudentNotFound(student_id.to_string()))
    }

    /// All students in insertion order.
    pub fn students(&self) -> Vec<Student> {
        self.lock().records.students.clone()
    }

    // --- Subjects ---

    pub fn add_subject(&self, subject: Subject) -> RecordResult<()> {
        subject.validate()?;

        let mut inner = self.lock();
        if inner.records.subject(&subject.code).is_some() {
            return Err(DuplicateRecord::Subject(subject.code).into());
        }

        let code = subject.code.clone();
        inner.records.subjects.push(subject);
        inner.persist(Collection::Subjects)?;
        info!("event=subject_add module=service status=ok subject_code={code}");
        Ok(())
    }

    /// Removes a subject and every timetable entry scheduling it.
    ///
    /// Unknown codes are not an error. Attendance records keep their
    /// reference to the removed code.
    pub fn remove_subject(&self, subject_code: &str) -> RecordResult<()> {
        let mut inner = self.lock();
        inner
            .records
            .subjects
            .retain(|subject| subject.code != subject_code);
        let before = inner.records.timetable.len();
        inner
            .records
            .timetable
            .retain(|entry| entry.subject_code != subject_code);
        let cascaded = before - inner.records.timetable.len();

        inner.persist(Collection::Subjects)?;
        inner.persist(Collection::Timetable)?;
        info!(
            "event=subject_remove module=service status=ok subject_code={subject_code} timetable_removed={cascaded}"
        );
        Ok(())
    }

    pub fn find_subject_by_code(&self, subject_code: &str) -> Option<Subject> {
        self.lock().records.subject(subject_code).cloned()
    }

    pub fn subjects(&self) -> Vec<Subject> {
        self.lock().records.subjects.clone()
    }

    // --- Time slots ---

    pub fn time_slots(&self) -> Vec<TimeSlot> {
        self.lock().records.time_slots.clone()
    }

    // --- Timetable ---

    /// Schedules a subject into a free `(day, slot_number)` pair.
    ///
    /// The subject code is not checked against the subject list.
    pub fn add_timetable_entry(&self, entry: TimetableEntry) -> RecordResult<()> {
        let mut inner = self.lock();
        if inner.records.scheduled(entry.day, entry.slot_number).is_some() {
            return Err(DuplicateRecord::TimetableSlot {
                day: entry.day,
                slot_number: entry.slot_number,
            }
            .into());
        }

        info!(
            "event=timetable_add module=service status=ok day={} slot={} subject_code={}",
            entry.day, entry.slot_number, entry.subject_code
        );
        inner.records.timetable.push(entry);
        inner.persist(Collection::Timetable)?;
        Ok(())
    }

    /// Clears `(day, slot_number)`; a free slot is left as is.
    pub fn remove_timetable_entry(&self, day: Weekday, slot_number: u32) -> RecordResult<()> {
        let mut inner = self.lock();
        inner
            .records
            .timetable
            .retain(|entry| !entry.occupies(day, slot_number));
        inner.persist(Collection::Timetable)?;
        Ok(())
    }

    pub fn timetable(&self) -> Vec<TimetableEntry> {
        self.lock().records.timetable.clone()
    }

    /// Entries scheduled on `day`, ascending by slot number.
    pub fn timetable_for_day(&self, day: Weekday) -> Vec<TimetableEntry> {
        let mut entries: Vec<TimetableEntry> = self
            .lock()
            .records
            .timetable
            .iter()
            .filter(|entry| entry.day == day)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| entry.slot_number);
        entries
    }

    // --- Attendance ---

    /// Records presence for one student in one slot on `date`.
    ///
    /// # Contract
    /// - The student must exist.
    /// - If the weekday of `date` schedules another subject in `slot_number`,
    ///   the mark is rejected. Unscheduled slots accept any subject.
    /// - An existing mark with the same `(student, date, slot)` is replaced.
    pub fn mark_attendance(
        &self,
        student_id: &str,
        subject_code: &str,
        date: NaiveDate,
        slot_number: u32,
        present: bool,
    ) -> RecordResult<()> {
        let mut inner = self.lock();
        if inner.records.student(student_id).is_none() {
            return Err(RecordServiceError::StudentNotFound(student_id.to_string()));
        }

        let day = date.weekday();
        if let Some(entry) = inner.records.scheduled(day, slot_number) {
            if entry.subject_code != subject_code {
                let mismatch = RecordValidationError::TimetableMismatch {
                    day,
                    slot_number,
                    scheduled: inner.records.subject_label(&entry.subject_code),
                    attempted: inner.records.subject_label(subject_code),
                };
                warn!(
                    "event=attendance_mark module=service status=rejected reason=timetable_mismatch student_id={student_id} slot={slot_number} scheduled={} attempted={subject_code}",
                    entry.subject_code
                );
                return Err(mismatch.into());
            }
        }

        inner
            .records
            .attendance
            .retain(|record| !record.has_key(student_id, date, slot_number));
        inner.records.attendance.push(AttendanceRecord::new(
            student_id,
            subject_code,
            date,
            slot_number,
            present,
        ));
        inner.persist(Collection::Attendance)?;
        info!(
            "event=attendance_mark module=service status=ok student_id={student_id} date={date} slot={slot_number} present={present}"
        );
        Ok(())
    }

    pub fn attendance(&self) -> Vec<AttendanceRecord> {
        self.lock().records.attendance.clone()
    }

    pub fn attendance_by_student(&self, student_id: &str) -> Vec<AttendanceRecord> {
        self.lock()
            .records
            .attendance_where(|record| record.student_id == student_id)
    }

    pub fn attendance_by_subject(&self, subject_code: &str) -> Vec<AttendanceRecord> {
        self.lock()
            .records
            .attendance_where(|record| record.subject_code == subject_code)
    }

    pub fn attendance_by_date(&self, date: NaiveDate) -> Vec<AttendanceRecord> {
        self.lock()
            .records
            .attendance_where(|record| record.date == date)
    }

    // --- Reports ---

    /// Overall presence percentage; `0.0` for a student without records.
    pub fn attendance_percentage(&self, student_id: &str) -> f64 {
        self.lock().records.percentage(student_id)
    }

    pub fn attendance_percentage_by_subject(&self, student_id: &str, subject_code: &str) -> f64 {
        self.lock()
            .records
            .percentage_by_subject(student_id, subject_code)
    }

    /// Overall percentage for every known student, keyed by student id.
    pub fn all_attendance_percentages(&self) -> BTreeMap<String, f64> {
        let inner = self.lock();
        inner
            .records
            .students
            .iter()
            .map(|student| (student.id.clone(), inner.records.percentage(&student.id)))
            .collect()
    }

    /// Per-subject percentages for every student and every current subject.
    ///
    /// Subjects without matching records report `0.0` rather than being
    /// omitted.
    pub fn subject_wise_attendance(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        let inner = self.lock();
        let records = &inner.records;
        records
            .students
            .iter()
            .map(|student| {
                let by_subject: BTreeMap<String, f64> = records
                    .subjects
                    .iter()
                    .map(|subject| {
                        (
                            subject.code.clone(),
                            records.percentage_by_subject(&student.id, &subject.code),
                        )
                    })
                    .collect();
                (student.id.clone(), by_subject)
            })
            .collect()
    }

    /// Students whose overall percentage is strictly below `threshold`.
    pub fn students_below_attendance(&self, threshold: f64) -> Vec<Student> {
        let inner = self.lock();
        inner
            .records
            .students
            .iter()
            .filter(|student| inner.records.percentage(&student.id) < threshold)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::RecordService;
    use crate::model::student::Student;
    use crate::store::MemoryStore;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn service_is_shareable_across_threads() {
        let service = Arc::new(RecordService::open(MemoryStore::new()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    service
                        .add_student(Student::new(format!("S{n}"), "Student", format!("{n}")))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(service.students().len(), 8);
    }

    #[test]
    fn into_store_returns_persisted_blobs() {
        let service = RecordService::open(MemoryStore::new()).unwrap();
        service
            .add_student(Student::new("S1", "Alice", "1"))
            .unwrap();

        let store = service.into_store();
        // time slots are seeded on open, students on add
        assert_eq!(store.len(), 2);
    }
}
