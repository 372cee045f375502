//! # REST API for Families and Members
//!
//! Endpoints for first-use family bootstrap and member management.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::caller::CallerIdentity;
use super::json_body::JsonBody;
use crate::backend::AppState;
use shared::{CreateChildMemberRequest, FamilyMemberListResponse, MyMemberResponse};

/// Get the caller's family, creating it on first use
pub async fn bootstrap_family(State(state): State<AppState>, caller: CallerIdentity) -> impl IntoResponse {
    info!("POST /api/families/bootstrap");

    match state.family_service.get_or_create_family(caller.identity()).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to bootstrap family: {}", e);
            e.into_response()
        }
    }
}

/// Get the member record linked to the caller
pub async fn get_my_member(State(state): State<AppState>, caller: CallerIdentity) -> impl IntoResponse {
    info!("GET /api/members/me");

    match state.family_service.get_my_member(caller.identity()).await {
        Ok(member) => (StatusCode::OK, Json(MyMemberResponse { member })).into_response(),
        Err(e) => {
            error!("Failed to get caller's member: {}", e);
            e.into_response()
        }
    }
}

/// List members of the caller's family
pub async fn list_family_members(State(state): State<AppState>, caller: CallerIdentity) -> impl IntoResponse {
    info!("GET /api/families/members");

    match state.family_service.list_family_members(caller.identity()).await {
        Ok(members) => (StatusCode::OK, Json(FamilyMemberListResponse { members })).into_response(),
        Err(e) => {
            error!("Failed to list family members: {}", e);
            e.into_response()
        }
    }
}

/// Add a child to the caller's family
pub async fn add_child_member(
    State(state): State<AppState>,
    caller: CallerIdentity,
    JsonBody(request): JsonBody<CreateChildMemberRequest>,
) -> impl IntoResponse {
    info!("POST /api/families/members - request: {:?}", request);

    match state.family_service.add_child_member(caller.identity(), request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to add family member: {}", e);
            e.into_response()
        }
    }
}
