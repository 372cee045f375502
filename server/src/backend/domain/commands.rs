//! Domain-level command and result types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined in
//! the `shared` crate to these internal types.

pub mod health_entries {
    use shared::{BowelQuality, HealthEntry};

    /// Input for creating or overwriting one member's entry for one day.
    ///
    /// Every metric is written as given; `None` clears a stored value.
    #[derive(Debug, Clone, Default)]
    pub struct UpsertHealthEntryCommand {
        pub family_member_id: String,
        pub date: String,
        pub mood: Option<i32>,
        pub energy: Option<i32>,
        pub inflammation: Option<i32>,
        pub bowel_movements: Option<i32>,
        pub bowel_quality: Option<BowelQuality>,
        pub notes: Option<String>,
    }

    /// Result of an upsert.
    #[derive(Debug, Clone)]
    pub struct UpsertHealthEntryResult {
        pub entry: HealthEntry,
        /// true when no entry existed for (member, date)
        pub created: bool,
    }
}
