//! # REST API for Insights
//!
//! Insights are recorded by the analysis job and read or dismissed by users.

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
use shared::{InsightListResponse, RecordInsightRequest};

#[derive(Debug, Default, Deserialize)]
pub struct InsightListQuery {
    #[serde(default)]
    pub include_dismissed: bool,
}

pub async fn record_insight(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(member_id): Path<String>,
    JsonBody(request): JsonBody<RecordInsightRequest>,
) -> impl IntoResponse {
    info!("POST /api/members/{}/insights - {}", member_id, request.title);

    match state
        .insight_service
        .record_insight(caller.identity(), &member_id, request)
        .await
    {
        Ok(insight) => (StatusCode::CREATED, Json(insight)).into_response(),
        Err(e) => {
            error!("Failed to record insight: {}", e);
            e.into_response()
        }
    }
}

pub async fn list_insights(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(member_id): Path<String>,
    Query(query): Query<InsightListQuery>,
) -> impl IntoResponse {
    info!("GET /api/members/{}/insights - {:?}", member_id, query);

    match state
        .insight_service
        .list_insights(caller.identity(), &member_id, query.include_dismissed)
        .await
    {
        Ok(insights) => (StatusCode::OK, Json(InsightListResponse { insights })).into_response(),
        Err(e) => {
            error!("Failed to list insights: {}", e);
            e.into_response()
        }
    }
}

pub async fn dismiss_insight(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(insight_id): Path<String>,
) -> impl IntoResponse {
    info!("PUT /api/insights/{}/dismiss", insight_id);

    match state.insight_service.dismiss_insight(caller.identity(), &insight_id).await {
        Ok(insight) => (StatusCode::OK, Json(insight)).into_response(),
        Err(e) => {
            error!("Failed to dismiss insight: {}", e);
            e.into_response()
        }
    }
}
