use std::sync::Arc;
use tracing::info;

use shared::{
    FoodEntry, IntakeListResponse, LogFoodRequest, LogMedicationRequest, LogVitaminRequest,
    MedicationEntry, VitaminEntry,
};

use super::errors::DomainResult;
use super::health_entry_service::HealthEntryService;
use super::identity::{require_identity, Identity};
use super::now_millis;
use super::validation::{validate_required_text, validate_time_of_day, MAX_NAME_LENGTH};
use crate::backend::storage::IntakeStorage;

const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Service for food, vitamin and medication intake logged against a day.
///
/// Every intake record copies the member and date of the health entry it
/// belongs to.
#[derive(Clone)]
pub struct IntakeService {
    storage: Arc<dyn IntakeStorage>,
    health_entry_service: HealthEntryService,
}

impl IntakeService {
    pub fn new(storage: Arc<dyn IntakeStorage>, health_entry_service: HealthEntryService) -> Self {
        Self {
            storage,
            health_entry_service,
        }
    }

    pub async fn log_food(
        &self,
        identity: Option<&Identity>,
        health_entry_id: &str,
        request: LogFoodRequest,
    ) -> DomainResult<FoodEntry> {
        require_identity(identity)?;
        let description =
            validate_required_text("Food description", &request.description, MAX_DESCRIPTION_LENGTH)?;
        let entry = self.health_entry_service.require_entry(health_entry_id).await?;

        let food = FoodEntry {
            id: FoodEntry::generate_id(),
            health_entry_id: entry.id,
            family_member_id: entry.family_member_id,
            date: entry.date,
            meal_type: request.meal_type,
            description,
            timestamp: now_millis(),
        };
        self.storage.store_food(&food).await?;

        info!("Logged {} for entry {}", food.meal_type, food.health_entry_id);
        Ok(food)
    }

    pub async fn log_vitamin(
        &self,
        identity: Option<&Identity>,
        health_entry_id: &str,
        request: LogVitaminRequest,
    ) -> DomainResult<VitaminEntry> {
        require_identity(identity)?;
        let vitamin_name = validate_required_text("Vitamin name", &request.vitamin_name, MAX_NAME_LENGTH)?;
        let entry = self.health_entry_service.require_entry(health_entry_id).await?;

        let vitamin = VitaminEntry {
            id: VitaminEntry::generate_id(),
            health_entry_id: entry.id,
            family_member_id: entry.family_member_id,
            date: entry.date,
            vitamin_name,
            dosage: request.dosage.filter(|d| !d.trim().is_empty()),
            taken: request.taken,
            timestamp: now_millis(),
        };
        self.storage.store_vitamin(&vitamin).await?;

        info!("Logged vitamin {} for entry {}", vitamin.vitamin_name, vitamin.health_entry_id);
        Ok(vitamin)
    }

    pub async fn log_medication(
        &self,
        identity: Option<&Identity>,
        health_entry_id: &str,
        request: LogMedicationRequest,
    ) -> DomainResult<MedicationEntry> {
        require_identity(identity)?;
        let medication_name =
            validate_required_text("Medication name", &request.medication_name, MAX_NAME_LENGTH)?;
        let dosage = validate_required_text("Dosage", &request.dosage, MAX_NAME_LENGTH)?;
        if let Some(ref time) = request.scheduled_time {
            validate_time_of_day("Scheduled time", time)?;
        }
        let entry = self.health_entry_service.require_entry(health_entry_id).await?;

        let medication = MedicationEntry {
            id: MedicationEntry::generate_id(),
            health_entry_id: entry.id,
            family_member_id: entry.family_member_id,
            date: entry.date,
            medication_name,
            dosage,
            taken: request.taken,
            timestamp: now_millis(),
            scheduled_time: request.scheduled_time,
        };
        self.storage.store_medication(&medication).await?;

        info!(
            "Logged medication {} for entry {}",
            medication.medication_name, medication.health_entry_id
        );
        Ok(medication)
    }

    /// Everything consumed on the day of the given entry
    pub async fn list_intake(
        &self,
        identity: Option<&Identity>,
        health_entry_id: &str,
    ) -> DomainResult<IntakeListResponse> {
        require_identity(identity)?;
        let entry = self.health_entry_service.require_entry(health_entry_id).await?;

        Ok(IntakeListResponse {
            foods: self.storage.list_foods(&entry.id).await?,
            vitamins: self.storage.list_vitamins(&entry.id).await?,
            medications: self.storage.list_medications(&entry.id).await?,
        })
    }
}
