//! # SQLite Storage Module
//!
//! SQLite-backed implementations of the storage traits.
//!
//! ## Components
//!
//! - **connection.rs** - pool management and schema setup
//! - **repositories/** - one repository per table group

pub mod connection;
pub mod repositories;

#[cfg(test)]
pub mod test_utils;

pub use connection::DbConnection;
pub use repositories::{
    FamilyRepository, HealthEntryRepository, InsightRepository, IntakeRepository,
    MedicationScheduleRepository,
};
