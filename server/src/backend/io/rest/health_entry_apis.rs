//! # REST API for Health Entries
//!
//! Endpoints for upserting a day's entry and reading a member's history.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::caller::CallerIdentity;
use super::json_body::JsonBody;
use super::mappers::health_entry_mapper::HealthEntryMapper;
use crate::backend::AppState;
use shared::{HealthEntryResponse, UpsertHealthEntryRequest};

/// Create or overwrite a member's entry for one day
pub async fn upsert_health_entry(
    State(state): State<AppState>,
    caller: CallerIdentity,
    JsonBody(request): JsonBody<UpsertHealthEntryRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/entries - member {} on {}",
        request.family_member_id, request.date
    );

    let command = HealthEntryMapper::to_upsert_command(request);
    match state.health_entry_service.upsert(caller.identity(), command).await {
        Ok(result) => {
            let status = if result.created { StatusCode::CREATED } else { StatusCode::OK };
            (status, Json(HealthEntryMapper::to_upsert_response(result))).into_response()
        }
        Err(e) => {
            error!("Failed to save entry: {}", e);
            e.into_response()
        }
    }
}

/// Get a member's entry for one date
pub async fn get_health_entry_by_date(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path((member_id, date)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/members/{}/entries/{}", member_id, date);

    match state
        .health_entry_service
        .get_by_date(caller.identity(), &member_id, &date)
        .await
    {
        Ok(entry) => (StatusCode::OK, Json(HealthEntryResponse { entry })).into_response(),
        Err(e) => {
            error!("Failed to get entry: {}", e);
            e.into_response()
        }
    }
}

/// Get a member's most recent 30 entries, newest first
pub async fn list_recent_health_entries(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/members/{}/entries", member_id);

    match state
        .health_entry_service
        .get_last_30_days(caller.identity(), &member_id)
        .await
    {
        Ok(entries) => (StatusCode::OK, Json(HealthEntryMapper::to_list_response(entries))).into_response(),
        Err(e) => {
            error!("Failed to list entries: {}", e);
            e.into_response()
        }
    }
}

/// Get the member's recent entries formatted for the timeline view
pub async fn get_timeline(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/members/{}/timeline", member_id);

    match state
        .health_entry_service
        .get_last_30_days(caller.identity(), &member_id)
        .await
    {
        Ok(entries) => {
            let timeline = state.timeline_service.build_timeline(&entries);
            (StatusCode::OK, Json(timeline)).into_response()
        }
        Err(e) => {
            error!("Failed to build timeline: {}", e);
            e.into_response()
        }
    }
}
