//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, cross-collection rules and persistence.
//! - Keep presentation layers decoupled from storage details.

pub mod error;
pub mod record_service;
pub mod report;
