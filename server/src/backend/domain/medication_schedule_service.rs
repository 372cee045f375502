use std::sync::Arc;
use tracing::info;

use shared::{CreateMedicationScheduleRequest, MedicationSchedule};

use super::errors::{DomainError, DomainResult};
use super::family_service::FamilyService;
use super::identity::{require_identity, Identity};
use super::validation::{
    parse_iso_date, validate_required_text, validate_time_of_day, MAX_NAME_LENGTH,
};
use crate::backend::storage::MedicationScheduleStorage;

/// Service for recurring medication reminder rules
#[derive(Clone)]
pub struct MedicationScheduleService {
    storage: Arc<dyn MedicationScheduleStorage>,
    family_service: FamilyService,
}

impl MedicationScheduleService {
    pub fn new(storage: Arc<dyn MedicationScheduleStorage>, family_service: FamilyService) -> Self {
        Self {
            storage,
            family_service,
        }
    }

    pub async fn create_schedule(
        &self,
        identity: Option<&Identity>,
        member_id: &str,
        request: CreateMedicationScheduleRequest,
    ) -> DomainResult<MedicationSchedule> {
        require_identity(identity)?;

        let medication_name =
            validate_required_text("Medication name", &request.medication_name, MAX_NAME_LENGTH)?;
        let dosage = validate_required_text("Dosage", &request.dosage, MAX_NAME_LENGTH)?;
        for time in &request.times {
            validate_time_of_day("Schedule time", time)?;
        }
        let start = parse_iso_date("Start date", &request.start_date)?;
        if let Some(ref end_date) = request.end_date {
            let end = parse_iso_date("End date", end_date)?;
            if end < start {
                return Err(DomainError::validation("End date cannot be before start date"));
            }
        }

        self.family_service.require_member(member_id).await?;

        let mut times = request.times;
        times.sort();
        times.dedup();

        let schedule = MedicationSchedule {
            id: MedicationSchedule::generate_id(),
            family_member_id: member_id.to_string(),
            medication_name,
            dosage,
            frequency: request.frequency,
            times,
            active: true,
            start_date: request.start_date,
            end_date: request.end_date,
            reminder_enabled: request.reminder_enabled,
        };
        self.storage.store_schedule(&schedule).await?;

        info!(
            "Created {} schedule {} for member {}",
            schedule.frequency, schedule.id, member_id
        );
        Ok(schedule)
    }

    pub async fn list_schedules(
        &self,
        identity: Option<&Identity>,
        member_id: &str,
        active_only: bool,
    ) -> DomainResult<Vec<MedicationSchedule>> {
        require_identity(identity)?;
        Ok(self.storage.list_schedules(member_id, active_only).await?)
    }

    pub async fn deactivate_schedule(
        &self,
        identity: Option<&Identity>,
        schedule_id: &str,
    ) -> DomainResult<MedicationSchedule> {
        require_identity(identity)?;

        if !self.storage.set_schedule_active(schedule_id, false).await? {
            return Err(DomainError::not_found("Medication schedule", schedule_id));
        }

        info!("Deactivated medication schedule {}", schedule_id);
        self.storage
            .get_schedule(schedule_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Medication schedule", schedule_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::sqlite::{DbConnection, FamilyRepository, MedicationScheduleRepository};
    use shared::MedicationFrequency;

    async fn setup() -> (MedicationScheduleService, String, Identity) {
        let db = DbConnection::init_in_memory().await.expect("Failed to init test DB");
        let identity = Identity::new("user_jack", None);
        let family_service = FamilyService::new(Arc::new(FamilyRepository::new(db.clone())));
        let member = family_service
            .get_or_create_family(Some(&identity))
            .await
            .unwrap()
            .member
            .unwrap();
        let service = MedicationScheduleService::new(
            Arc::new(MedicationScheduleRepository::new(db)),
            family_service,
        );
        (service, member.id, identity)
    }

    fn request() -> CreateMedicationScheduleRequest {
        CreateMedicationScheduleRequest {
            medication_name: "Mesalamine".to_string(),
            dosage: "800mg".to_string(),
            frequency: MedicationFrequency::TwiceDaily,
            times: vec!["20:00".to_string(), "08:00".to_string(), "08:00".to_string()],
            start_date: "2026-02-01".to_string(),
            end_date: Some("2026-03-01".to_string()),
            reminder_enabled: true,
        }
    }

    #[tokio::test]
    async fn test_create_list_and_deactivate() {
        let (service, member_id, identity) = setup().await;

        let created = service
            .create_schedule(Some(&identity), &member_id, request())
            .await
            .unwrap();
        assert!(created.active);
        assert_eq!(created.times, vec!["08:00", "20:00"]);

        let active = service.list_schedules(Some(&identity), &member_id, true).await.unwrap();
        assert_eq!(active, vec![created.clone()]);

        let deactivated = service
            .deactivate_schedule(Some(&identity), &created.id)
            .await
            .unwrap();
        assert!(!deactivated.active);

        assert!(service.list_schedules(Some(&identity), &member_id, true).await.unwrap().is_empty());
        assert_eq!(service.list_schedules(Some(&identity), &member_id, false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_schedule_validation() {
        let (service, member_id, identity) = setup().await;

        let backwards = CreateMedicationScheduleRequest {
            end_date: Some("2026-01-01".to_string()),
            ..request()
        };
        let err = service
            .create_schedule(Some(&identity), &member_id, backwards)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "End date cannot be before start date");

        let bad_time = CreateMedicationScheduleRequest {
            times: vec!["8pm".to_string()],
            ..request()
        };
        assert!(matches!(
            service.create_schedule(Some(&identity), &member_id, bad_time).await,
            Err(DomainError::Validation(_))
        ));

        assert!(matches!(
            service.create_schedule(Some(&identity), "member::missing", request()).await,
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            service.create_schedule(None, &member_id, request()).await,
            Err(DomainError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_deactivate_missing_schedule() {
        let (service, _member_id, identity) = setup().await;
        assert!(matches!(
            service.deactivate_schedule(Some(&identity), "schedule::missing").await,
            Err(DomainError::NotFound(_))
        ));
    }
}
