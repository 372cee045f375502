//! # Storage Traits
//!
//! Storage abstractions the domain services depend on. The SQLite
//! repositories implement them; a different backend only needs to provide
//! the same operations.

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    Family, FamilyMember, FoodEntry, HealthEntry, Insight, MedicationEntry, MedicationSchedule,
    VitaminEntry,
};

/// Families and their members
#[async_trait]
pub trait FamilyStorage: Send + Sync {
    /// Find the family owned by the given identity subject
    async fn get_family_by_owner(&self, owner_id: &str) -> Result<Option<Family>>;

    /// Insert a family together with its first member in one transaction
    async fn create_family_with_member(&self, family: &Family, member: &FamilyMember) -> Result<()>;

    async fn get_member(&self, member_id: &str) -> Result<Option<FamilyMember>>;

    /// Find the first member linked to the given identity subject
    async fn get_member_by_user(&self, user_id: &str) -> Result<Option<FamilyMember>>;

    /// List members of a family, adults first, then by name
    async fn list_members(&self, family_id: &str) -> Result<Vec<FamilyMember>>;

    async fn store_member(&self, member: &FamilyMember) -> Result<()>;
}

/// Daily health entries
#[async_trait]
pub trait HealthEntryStorage: Send + Sync {
    async fn get_entry(&self, entry_id: &str) -> Result<Option<HealthEntry>>;

    /// Exact lookup on (member, date)
    async fn get_entry_by_date(&self, member_id: &str, date: &str) -> Result<Option<HealthEntry>>;

    async fn store_entry(&self, entry: &HealthEntry) -> Result<()>;

    /// Overwrite the metric fields, notes and `updated_at` of an existing entry.
    /// `created_at` and `logged_by` are never touched.
    async fn update_entry(&self, entry: &HealthEntry) -> Result<()>;

    /// Entries for a member ordered by date descending (most recent first)
    async fn list_recent_entries(&self, member_id: &str, limit: u32) -> Result<Vec<HealthEntry>>;
}

/// Food, vitamin and medication entries attached to a health entry
#[async_trait]
pub trait IntakeStorage: Send + Sync {
    async fn store_food(&self, food: &FoodEntry) -> Result<()>;

    async fn store_vitamin(&self, vitamin: &VitaminEntry) -> Result<()>;

    async fn store_medication(&self, medication: &MedicationEntry) -> Result<()>;

    /// Ordered by timestamp ascending
    async fn list_foods(&self, health_entry_id: &str) -> Result<Vec<FoodEntry>>;

    async fn list_vitamins(&self, health_entry_id: &str) -> Result<Vec<VitaminEntry>>;

    async fn list_medications(&self, health_entry_id: &str) -> Result<Vec<MedicationEntry>>;
}

#[async_trait]
pub trait MedicationScheduleStorage: Send + Sync {
    async fn store_schedule(&self, schedule: &MedicationSchedule) -> Result<()>;

    async fn get_schedule(&self, schedule_id: &str) -> Result<Option<MedicationSchedule>>;

    /// Ordered by medication name
    async fn list_schedules(&self, member_id: &str, active_only: bool) -> Result<Vec<MedicationSchedule>>;

    /// Returns true if the schedule was found
    async fn set_schedule_active(&self, schedule_id: &str, active: bool) -> Result<bool>;
}

#[async_trait]
pub trait InsightStorage: Send + Sync {
    async fn store_insight(&self, insight: &Insight) -> Result<()>;

    async fn get_insight(&self, insight_id: &str) -> Result<Option<Insight>>;

    /// Ordered by creation time, newest first
    async fn list_insights(&self, member_id: &str, include_dismissed: bool) -> Result<Vec<Insight>>;

    /// Returns true if the insight was found
    async fn dismiss_insight(&self, insight_id: &str) -> Result<bool>;
}
