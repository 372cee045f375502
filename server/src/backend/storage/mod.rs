//! # Storage Module
//!
//! Handles all data persistence for the health journal.
//!
//! Domain services only see the traits in [`traits`]; the SQLite
//! repositories in [`sqlite`] are the one implementation wired up at
//! startup. Every table carries the secondary indexes the read paths need
//! (`by_owner`, `by_user`, `by_member_and_date`, ...), so each lookup is a
//! single index probe or ordered range scan.
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Dependency Inversion**: Domain depends on storage abstractions, not implementations
//! - **Testability**: Every repository runs against a private in-memory database in tests

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{
    FamilyStorage, HealthEntryStorage, InsightStorage, IntakeStorage, MedicationScheduleStorage,
};
