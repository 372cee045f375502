use crate::backend::domain::commands::health_entries::{
    UpsertHealthEntryCommand, UpsertHealthEntryResult,
};
use shared::{HealthEntry, HealthEntryListResponse, UpsertHealthEntryRequest, UpsertHealthEntryResponse};

/// Mapper between health entry DTOs and domain commands.
pub struct HealthEntryMapper;

impl HealthEntryMapper {
    pub fn to_upsert_command(request: UpsertHealthEntryRequest) -> UpsertHealthEntryCommand {
        UpsertHealthEntryCommand {
            family_member_id: request.family_member_id,
            date: request.date,
            mood: request.mood,
            energy: request.energy,
            inflammation: request.inflammation,
            bowel_movements: request.bowel_movements,
            bowel_quality: request.bowel_quality,
            notes: request.notes,
        }
    }

    pub fn to_upsert_response(result: UpsertHealthEntryResult) -> UpsertHealthEntryResponse {
        let success_message = if result.created {
            "Health entry saved successfully"
        } else {
            "Health entry updated successfully"
        };

        UpsertHealthEntryResponse {
            entry_id: result.entry.id.clone(),
            entry: result.entry,
            created: result.created,
            success_message: success_message.to_string(),
        }
    }

    pub fn to_list_response(entries: Vec<HealthEntry>) -> HealthEntryListResponse {
        HealthEntryListResponse { entries }
    }
}
