pub mod family_repository;
pub mod health_entry_repository;
pub mod insight_repository;
pub mod intake_repository;
pub mod medication_schedule_repository;

pub use family_repository::FamilyRepository;
pub use health_entry_repository::HealthEntryRepository;
pub use insight_repository::InsightRepository;
pub use intake_repository::IntakeRepository;
pub use medication_schedule_repository::MedicationScheduleRepository;
