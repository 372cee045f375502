//! # REST API for Medication Schedules

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use super::caller::CallerIdentity;
use super::json_body::JsonBody;
use crate::backend::AppState;
use shared::{CreateMedicationScheduleRequest, MedicationScheduleListResponse};

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleListQuery {
    #[serde(default)]
    pub active_only: bool,
}

pub async fn create_medication_schedule(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(member_id): Path<String>,
    JsonBody(request): JsonBody<CreateMedicationScheduleRequest>,
) -> impl IntoResponse {
    info!("POST /api/members/{}/medication-schedules - request: {:?}", member_id, request);

    match state
        .medication_schedule_service
        .create_schedule(caller.identity(), &member_id, request)
        .await
    {
        Ok(schedule) => (StatusCode::CREATED, Json(schedule)).into_response(),
        Err(e) => {
            error!("Failed to create medication schedule: {}", e);
            e.into_response()
        }
    }
}

pub async fn list_medication_schedules(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(member_id): Path<String>,
    Query(query): Query<ScheduleListQuery>,
) -> impl IntoResponse {
    info!("GET /api/members/{}/medication-schedules - {:?}", member_id, query);

    match state
        .medication_schedule_service
        .list_schedules(caller.identity(), &member_id, query.active_only)
        .await
    {
        Ok(schedules) => (StatusCode::OK, Json(MedicationScheduleListResponse { schedules })).into_response(),
        Err(e) => {
            error!("Failed to list medication schedules: {}", e);
            e.into_response()
        }
    }
}

pub async fn deactivate_medication_schedule(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(schedule_id): Path<String>,
) -> impl IntoResponse {
    info!("PUT /api/medication-schedules/{}/deactivate", schedule_id);

    match state
        .medication_schedule_service
        .deactivate_schedule(caller.identity(), &schedule_id)
        .await
    {
        Ok(schedule) => (StatusCode::OK, Json(schedule)).into_response(),
        Err(e) => {
            error!("Failed to deactivate medication schedule: {}", e);
            e.into_response()
        }
    }
}
