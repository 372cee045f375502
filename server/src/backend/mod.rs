//! # Backend Module
//!
//! Contains all server-side logic for the family health journal.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Clients (web/mobile, behind the authenticating proxy)
//!     ↓
//! IO Layer (REST API, identity extraction)
//!     ↓
//! Domain Layer (Business rules, services)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! This module wires the layers together: it opens the database, builds the
//! services and exposes the router.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::backend::config::Config;
use crate::backend::domain::{
    FamilyService, HealthEntryService, InsightService, IntakeService, MedicationScheduleService,
    TimelineService,
};
use crate::backend::storage::sqlite::{
    FamilyRepository, HealthEntryRepository, InsightRepository, IntakeRepository,
    MedicationScheduleRepository,
};
use crate::backend::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub family_service: FamilyService,
    pub health_entry_service: HealthEntryService,
    pub timeline_service: TimelineService,
    pub intake_service: IntakeService,
    pub medication_schedule_service: MedicationScheduleService,
    pub insight_service: InsightService,
}

/// Initialize the backend against the configured database
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    Ok(initialize_with_db(db_conn))
}

/// Build every service on top of an open database
pub fn initialize_with_db(db_conn: DbConnection) -> AppState {
    info!("Setting up domain model");
    let family_service = FamilyService::new(Arc::new(FamilyRepository::new(db_conn.clone())));
    let health_entry_service = HealthEntryService::new(
        Arc::new(HealthEntryRepository::new(db_conn.clone())),
        family_service.clone(),
    );
    let intake_service = IntakeService::new(
        Arc::new(IntakeRepository::new(db_conn.clone())),
        health_entry_service.clone(),
    );
    let medication_schedule_service = MedicationScheduleService::new(
        Arc::new(MedicationScheduleRepository::new(db_conn.clone())),
        family_service.clone(),
    );
    let insight_service = InsightService::new(
        Arc::new(InsightRepository::new(db_conn)),
        family_service.clone(),
    );

    info!("Setting up application state");
    AppState {
        family_service,
        health_entry_service,
        timeline_service: TimelineService::new(),
        intake_service,
        medication_schedule_service,
        insight_service,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/families/bootstrap", post(io::bootstrap_family))
        .route(
            "/families/members",
            get(io::list_family_members).post(io::add_child_member),
        )
        .route("/members/me", get(io::get_my_member))
        .route("/entries", put(io::upsert_health_entry))
        .route("/members/:member_id/entries", get(io::list_recent_health_entries))
        .route("/members/:member_id/entries/:date", get(io::get_health_entry_by_date))
        .route("/members/:member_id/timeline", get(io::get_timeline))
        .route("/entries/:entry_id/foods", post(io::log_food))
        .route("/entries/:entry_id/vitamins", post(io::log_vitamin))
        .route("/entries/:entry_id/medications", post(io::log_medication))
        .route("/entries/:entry_id/intake", get(io::list_intake))
        .route(
            "/members/:member_id/medication-schedules",
            get(io::list_medication_schedules).post(io::create_medication_schedule),
        )
        .route(
            "/medication-schedules/:schedule_id/deactivate",
            put(io::deactivate_medication_schedule),
        )
        .route(
            "/members/:member_id/insights",
            get(io::list_insights).post(io::record_insight),
        )
        .route("/insights/:insight_id/dismiss", put(io::dismiss_insight));

    let router = Router::new().nest("/api", api_routes);
    let router = match &config.static_dir {
        Some(dir) => {
            info!("Serving static files from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    };

    router.layer(cors).with_state(app_state)
}
