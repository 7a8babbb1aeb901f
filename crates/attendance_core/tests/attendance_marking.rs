use attendance_core::{
    MemoryStore, RecordErrorKind, RecordService, RecordServiceError, RecordValidationError,
    Student, Subject, TimetableEntry,
};
use chrono::{NaiveDate, Weekday};

// 2024-01-01 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn scheduled_service() -> RecordService<MemoryStore> {
    let service = RecordService::open(MemoryStore::new()).unwrap();
    service.add_subject(Subject::new("CS101", "Core Java")).unwrap();
    service
        .add_timetable_entry(TimetableEntry::new(Weekday::Mon, 1, "CS101"))
        .unwrap();
    service.add_student(Student::new("S1", "Alice", "1")).unwrap();
    service
}

#[test]
fn scheduled_subject_mismatch_is_rejected() {
    let service = scheduled_service();

    service
        .mark_attendance("S1", "CS101", monday(), 1, true)
        .unwrap();
    let records = service.attendance_by_student("S1");
    assert_eq!(records.len(), 1);
    assert!(records[0].present);

    let err = service
        .mark_attendance("S1", "MAT101", monday(), 1, false)
        .unwrap_err();
    assert_eq!(err.kind(), RecordErrorKind::Validation);
    match &err {
        RecordServiceError::Validation(RecordValidationError::TimetableMismatch {
            day,
            slot_number,
            scheduled,
            attempted,
        }) => {
            assert_eq!(*day, Weekday::Mon);
            assert_eq!(*slot_number, 1);
            // known subject resolves to its name, unknown falls back to code
            assert_eq!(scheduled, "Core Java");
            assert_eq!(attempted, "MAT101");
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("Core Java"));
    assert!(message.contains("MAT101"));

    assert_eq!(service.attendance_percentage("S1"), 100.0);
}

#[test]
fn mismatch_message_uses_names_of_both_known_subjects() {
    let service = scheduled_service();
    service.add_subject(Subject::new("MAT101", "Calculus")).unwrap();

    let err = service
        .mark_attendance("S1", "MAT101", monday(), 1, true)
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'Core Java'"));
    assert!(message.contains("'Calculus'"));
}

#[test]
fn unscheduled_slot_accepts_any_subject() {
    let service = scheduled_service();

    service
        .mark_attendance("S1", "MAT101", monday(), 4, true)
        .unwrap();
    // same slot number on a Tuesday has no entry either
    let tuesday = monday().succ_opt().unwrap();
    service
        .mark_attendance("S1", "UNKNOWN1", tuesday, 1, false)
        .unwrap();

    assert_eq!(service.attendance().len(), 2);
}

#[test]
fn repeated_mark_overwrites_previous_value() {
    let service = scheduled_service();

    service
        .mark_attendance("S1", "CS101", monday(), 1, true)
        .unwrap();
    service
        .mark_attendance("S1", "CS101", monday(), 1, false)
        .unwrap();

    let records = service.attendance_by_date(monday());
    assert_eq!(records.len(), 1);
    assert!(!records[0].present);
    assert_eq!(service.attendance_percentage("S1"), 0.0);
}

#[test]
fn unknown_student_is_not_found() {
    let service = scheduled_service();
    let err = service
        .mark_attendance("S404", "CS101", monday(), 1, true)
        .unwrap_err();
    assert!(matches!(err, RecordServiceError::StudentNotFound(ref id) if id == "S404"));
    assert!(service.attendance().is_empty());
}

#[test]
fn rejected_mark_keeps_existing_record() {
    let service = scheduled_service();
    service
        .mark_attendance("S1", "CS101", monday(), 1, true)
        .unwrap();

    service
        .mark_attendance("S1", "PHY101", monday(), 1, false)
        .unwrap_err();

    let records = service.attendance();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].subject_code, "CS101");
    assert!(records[0].present);
}
