//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a record store, seed the demo data set and print a report.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Configuration comes from the environment:
//! - `ATTENDANCE_DB`: database file path; in-memory when unset.
//! - `ATTENDANCE_LOG_DIR` / `ATTENDANCE_LOG_LEVEL`: optional file logging.

use attendance_core::logging::{init_logging_with, LoggingConfig};
use attendance_core::{core_version, seed_demo_data, RecordService, SqliteStore, Store};
use chrono::{Datelike, Local, Weekday};
use std::error::Error;
use std::process::ExitCode;

const DB_PATH_ENV: &str = "ATTENDANCE_DB";
const LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Some(config) = LoggingConfig::from_env()? {
        init_logging_with(config)?;
    }

    let store = match std::env::var(DB_PATH_ENV) {
        Ok(path) => SqliteStore::open(path)?,
        Err(_) => SqliteStore::open_in_memory()?,
    };
    let service = RecordService::open(store)?;

    let today = Local::now().date_naive();
    let summary = seed_demo_data(&service, today)?;

    println!("attendance_core version={}", core_version());
    println!(
        "seeded subjects={} students={} timetable={} marks={} skipped={}",
        summary.subjects, summary.students, summary.timetable, summary.marks, summary.skipped
    );
    print_report(&service, today.weekday());
    Ok(())
}

fn print_report<S: Store>(service: &RecordService<S>, day: Weekday) {
    println!("timetable for {day}:");
    for entry in service.timetable_for_day(day) {
        let subject = service
            .find_subject_by_code(&entry.subject_code)
            .map_or(entry.subject_code.clone(), |subject| subject.name);
        println!("  slot {} {}", entry.slot_number, subject);
    }

    println!("attendance:");
    for (student_id, pct) in service.all_attendance_percentages() {
        println!("  {student_id} {pct:.1}%");
    }

    let low = service.students_below_attendance(LOW_ATTENDANCE_THRESHOLD);
    println!(
        "below {LOW_ATTENDANCE_THRESHOLD:.0}%: {}",
        low.iter()
            .map(|student| student.id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    );
}
