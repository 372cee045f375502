use std::sync::Arc;
use tracing::{info, warn};

use shared::HealthEntry;

use super::commands::health_entries::{UpsertHealthEntryCommand, UpsertHealthEntryResult};
use super::errors::{DomainError, DomainResult};
use super::family_service::FamilyService;
use super::identity::{require_identity, Identity};
use super::now_millis;
use super::validation::parse_iso_date;
use crate::backend::storage::HealthEntryStorage;

/// How many days the timeline shows
pub const RECENT_ENTRY_LIMIT: u32 = 30;

/// Service for daily health entries
#[derive(Clone)]
pub struct HealthEntryService {
    storage: Arc<dyn HealthEntryStorage>,
    family_service: FamilyService,
}

impl HealthEntryService {
    pub fn new(storage: Arc<dyn HealthEntryStorage>, family_service: FamilyService) -> Self {
        Self {
            storage,
            family_service,
        }
    }

    /// Create the member's entry for `date`, or overwrite it if one exists.
    ///
    /// Uniqueness of (member, date) relies on this lookup-then-write; there is
    /// no database constraint behind it. Whoever logs on behalf of a child is
    /// not checked against the child's family.
    pub async fn upsert(
        &self,
        identity: Option<&Identity>,
        command: UpsertHealthEntryCommand,
    ) -> DomainResult<UpsertHealthEntryResult> {
        let identity = require_identity(identity)?;
        parse_iso_date("Date", &command.date)?;
        self.family_service.require_member(&command.family_member_id).await?;

        let now = now_millis();
        let existing = self
            .storage
            .get_entry_by_date(&command.family_member_id, &command.date)
            .await?;

        match existing {
            Some(existing) => {
                let entry = HealthEntry {
                    mood: command.mood,
                    energy: command.energy,
                    inflammation: command.inflammation,
                    bowel_movements: command.bowel_movements,
                    bowel_quality: command.bowel_quality,
                    notes: command.notes,
                    updated_at: now,
                    ..existing
                };
                self.storage.update_entry(&entry).await?;

                info!(
                    "Updated health entry {} for member {} on {}",
                    entry.id, entry.family_member_id, entry.date
                );
                Ok(UpsertHealthEntryResult {
                    entry,
                    created: false,
                })
            }
            None => {
                let entry = HealthEntry {
                    id: HealthEntry::generate_id(),
                    family_member_id: command.family_member_id,
                    date: command.date,
                    mood: command.mood,
                    energy: command.energy,
                    inflammation: command.inflammation,
                    bowel_movements: command.bowel_movements,
                    bowel_quality: command.bowel_quality,
                    notes: command.notes,
                    created_at: now,
                    updated_at: now,
                    logged_by: identity.subject.clone(),
                };
                self.storage.store_entry(&entry).await?;

                info!(
                    "Created health entry {} for member {} on {} (logged by {})",
                    entry.id, entry.family_member_id, entry.date, entry.logged_by
                );
                Ok(UpsertHealthEntryResult {
                    entry,
                    created: true,
                })
            }
        }
    }

    /// The member's entry for exactly `date`, if any
    pub async fn get_by_date(
        &self,
        identity: Option<&Identity>,
        member_id: &str,
        date: &str,
    ) -> DomainResult<Option<HealthEntry>> {
        require_identity(identity)?;
        parse_iso_date("Date", date)?;

        Ok(self.storage.get_entry_by_date(member_id, date).await?)
    }

    /// Up to 30 of the member's most recent entries, newest date first
    pub async fn get_last_30_days(
        &self,
        identity: Option<&Identity>,
        member_id: &str,
    ) -> DomainResult<Vec<HealthEntry>> {
        require_identity(identity)?;

        let entries = self
            .storage
            .list_recent_entries(member_id, RECENT_ENTRY_LIMIT)
            .await?;

        info!("Found {} recent entries for member {}", entries.len(), member_id);
        Ok(entries)
    }

    /// Look up an entry by id, failing with NotFound if absent
    pub async fn require_entry(&self, entry_id: &str) -> DomainResult<HealthEntry> {
        match self.storage.get_entry(entry_id).await? {
            Some(entry) => Ok(entry),
            None => {
                warn!("Health entry not found: {}", entry_id);
                Err(DomainError::not_found("Health entry", entry_id))
            }
        }
    }
}
