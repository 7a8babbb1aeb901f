//! Domain model for the attendance record collections.
//!
//! # Responsibility
//! - Define the five entity kinds held by `RecordService`.
//! - Provide field-level validation shared by service write paths.
//!
//! # Invariants
//! - Entities are plain values; cross-collection rules live in the service.
//! - Every entity round-trips through serde without loss.

pub mod attendance;
pub mod schedule;
pub mod student;
pub mod subject;
pub mod validation;
