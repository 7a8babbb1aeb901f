//! Core record management for student attendance.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::attendance::AttendanceRecord;
pub use model::schedule::{TimeSlot, TimetableEntry};
pub use model::student::Student;
pub use model::subject::Subject;
pub use model::validation::RecordValidationError;
pub use seed::{seed_demo_data, SeedSummary};
pub use service::error::{DuplicateRecord, RecordErrorKind, RecordResult, RecordServiceError};
pub use service::record_service::RecordService;
pub use store::{
    load_collection, save_collection, Collection, MemoryStore, SqliteStore, Store, StoreError,
    StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
