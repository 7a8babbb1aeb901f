use attendance_core::{MemoryStore, RecordService, Student, Subject};
use chrono::NaiveDate;

// 2024-01-06 is a Saturday; nothing is scheduled, so any subject is accepted.
fn saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()
}

fn service_with_marks() -> RecordService<MemoryStore> {
    let service = RecordService::open(MemoryStore::new()).unwrap();
    service.add_subject(Subject::new("CS101", "Core Java")).unwrap();
    service.add_subject(Subject::new("MAT101", "Calculus")).unwrap();
    service.add_subject(Subject::new("ENG101", "English")).unwrap();
    service.add_student(Student::new("S1", "Alice", "1")).unwrap();
    service.add_student(Student::new("S2", "Bob", "2")).unwrap();
    service.add_student(Student::new("S3", "Carol", "3")).unwrap();

    let day = saturday();
    service.mark_attendance("S1", "CS101", day, 1, true).unwrap();
    service.mark_attendance("S1", "CS101", day, 2, true).unwrap();
    service.mark_attendance("S1", "MAT101", day, 3, false).unwrap();
    service.mark_attendance("S2", "MAT101", day, 1, false).unwrap();
    service
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn percentage_is_zero_without_records_and_unrounded_otherwise() {
    let service = service_with_marks();

    assert_eq!(service.attendance_percentage("S3"), 0.0);
    assert_eq!(service.attendance_percentage("nobody"), 0.0);
    assert_close(service.attendance_percentage("S1"), 200.0 / 3.0);
    assert_eq!(service.attendance_percentage("S2"), 0.0);
}

#[test]
fn percentage_by_subject_restricts_records() {
    let service = service_with_marks();

    assert_eq!(service.attendance_percentage_by_subject("S1", "CS101"), 100.0);
    assert_eq!(service.attendance_percentage_by_subject("S1", "MAT101"), 0.0);
    assert_eq!(service.attendance_percentage_by_subject("S1", "ENG101"), 0.0);
}

#[test]
fn all_percentages_cover_every_student() {
    let service = service_with_marks();
    let all = service.all_attendance_percentages();

    assert_eq!(all.len(), 3);
    assert_close(all["S1"], 200.0 / 3.0);
    assert_eq!(all["S2"], 0.0);
    assert_eq!(all["S3"], 0.0);
}

#[test]
fn subject_wise_report_is_full_cross_product() {
    let service = service_with_marks();
    let report = service.subject_wise_attendance();

    assert_eq!(report.len(), 3);
    for by_subject in report.values() {
        assert_eq!(by_subject.len(), 3);
    }
    assert_eq!(report["S1"]["CS101"], 100.0);
    assert_eq!(report["S1"]["MAT101"], 0.0);
    assert_eq!(report["S3"]["ENG101"], 0.0);
}

#[test]
fn subject_wise_report_ignores_records_of_removed_subjects() {
    let service = service_with_marks();
    service.remove_subject("CS101").unwrap();

    let report = service.subject_wise_attendance();
    assert!(!report["S1"].contains_key("CS101"));
    // the orphaned records still count toward the overall figure
    assert_close(service.attendance_percentage("S1"), 200.0 / 3.0);
}

#[test]
fn students_below_threshold_is_strict_and_ordered() {
    let service = service_with_marks();

    let ids = |threshold: f64| -> Vec<String> {
        service
            .students_below_attendance(threshold)
            .into_iter()
            .map(|student| student.id)
            .collect()
    };

    assert_eq!(ids(75.0), vec!["S1", "S2", "S3"]);
    assert_eq!(ids(50.0), vec!["S2", "S3"]);
    assert_eq!(ids(0.0), Vec::<String>::new());
}

#[test]
fn attendance_filters_by_student_subject_and_date() {
    let service = service_with_marks();
    let next_day = saturday().succ_opt().unwrap();
    service
        .mark_attendance("S3", "ENG101", next_day, 1, true)
        .unwrap();

    assert_eq!(service.attendance_by_student("S1").len(), 3);
    assert_eq!(service.attendance_by_subject("MAT101").len(), 2);
    assert_eq!(service.attendance_by_date(saturday()).len(), 4);
    assert_eq!(service.attendance_by_date(next_day).len(), 1);
    assert_eq!(service.attendance().len(), 5);
}
