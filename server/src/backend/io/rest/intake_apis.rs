//! # REST API for Intake Logging
//!
//! Food, vitamin and medication records attached to a health entry.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::caller::CallerIdentity;
use super::json_body::JsonBody;
use crate::backend::AppState;
use shared::{LogFoodRequest, LogMedicationRequest, LogVitaminRequest};

pub async fn log_food(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(entry_id): Path<String>,
    JsonBody(request): JsonBody<LogFoodRequest>,
) -> impl IntoResponse {
    info!("POST /api/entries/{}/foods - request: {:?}", entry_id, request);

    match state.intake_service.log_food(caller.identity(), &entry_id, request).await {
        Ok(food) => (StatusCode::CREATED, Json(food)).into_response(),
        Err(e) => {
            error!("Failed to log food: {}", e);
            e.into_response()
        }
    }
}

pub async fn log_vitamin(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(entry_id): Path<String>,
    JsonBody(request): JsonBody<LogVitaminRequest>,
) -> impl IntoResponse {
    info!("POST /api/entries/{}/vitamins - request: {:?}", entry_id, request);

    match state.intake_service.log_vitamin(caller.identity(), &entry_id, request).await {
        Ok(vitamin) => (StatusCode::CREATED, Json(vitamin)).into_response(),
        Err(e) => {
            error!("Failed to log vitamin: {}", e);
            e.into_response()
        }
    }
}

pub async fn log_medication(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(entry_id): Path<String>,
    JsonBody(request): JsonBody<LogMedicationRequest>,
) -> impl IntoResponse {
    info!("POST /api/entries/{}/medications - request: {:?}", entry_id, request);

    match state.intake_service.log_medication(caller.identity(), &entry_id, request).await {
        Ok(medication) => (StatusCode::CREATED, Json(medication)).into_response(),
        Err(e) => {
            error!("Failed to log medication: {}", e);
            e.into_response()
        }
    }
}

/// Everything logged against one entry
pub async fn list_intake(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(entry_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/entries/{}/intake", entry_id);

    match state.intake_service.list_intake(caller.identity(), &entry_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list intake: {}", e);
            e.into_response()
        }
    }
}
