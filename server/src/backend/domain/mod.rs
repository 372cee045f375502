//! # Domain Module
//!
//! Contains all business logic for the family health journal.
//!
//! Services here own the rules for who may read and write, how a day's entry
//! is created or overwritten, and how entries are presented. They depend on
//! the storage traits only, never on SQLite directly.
//!
//! ## Module Organization
//!
//! - **family_service**: Family bootstrap on first sign-in and member management
//! - **health_entry_service**: One entry per member per day, upserted in place
//! - **timeline**: Display formatting for the 30-day history
//! - **intake_service**: Food, vitamin and medication intake tied to a day's entry
//! - **medication_schedule_service**: Recurring medication reminder rules
//! - **insight_service**: Recorded analytics insights and their dismissal
//!
//! ## Business Rules
//!
//! - Every write requires a verified caller identity
//! - A caller owns at most one family, created lazily with a parent member
//! - Children have no identity of their own; a parent logs for them
//! - Dates are stored as `YYYY-MM-DD` text, so text order is date order
//! - Timestamps are milliseconds since the Unix epoch

pub mod commands;
pub mod errors;
pub mod family_service;
pub mod health_entry_service;
pub mod identity;
pub mod insight_service;
pub mod intake_service;
pub mod medication_schedule_service;
pub mod timeline;
pub mod validation;

pub use errors::{DomainError, DomainResult};
pub use family_service::FamilyService;
pub use health_entry_service::HealthEntryService;
pub use identity::Identity;
pub use insight_service::InsightService;
pub use intake_service::IntakeService;
pub use medication_schedule_service::MedicationScheduleService;
pub use timeline::TimelineService;

/// Current time in epoch milliseconds
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
