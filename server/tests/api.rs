use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

use health_journal_server::backend::{
    config::Config, create_router, initialize_with_db, storage::DbConnection,
};
use shared::{
    ErrorResponse, FamilyBootstrapResponse, FamilyMemberListResponse, FamilyMemberResponse,
    HealthEntryListResponse, HealthEntryResponse, InsightListResponse, IntakeListResponse,
    MedicationSchedule, MedicationScheduleListResponse, MyMemberResponse, TimelineResponse,
    UpsertHealthEntryResponse,
};

const JACK: &str = "user_jack";

async fn test_app() -> Router {
    let db = DbConnection::init_in_memory().await.expect("Failed to init test DB");
    create_router(initialize_with_db(db), &Config::default())
}

async fn send(app: &Router, method: Method, uri: &str, subject: Option<&str>, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(subject) = subject {
        request = request
            .header("x-identity-subject", subject)
            .header("x-identity-name", "Jack");
    }
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).expect("response should be valid JSON")
}

async fn bootstrap(app: &Router) -> FamilyBootstrapResponse {
    let (status, body) = send(app, Method::POST, "/api/families/bootstrap", Some(JACK), None).await;
    assert_eq!(status, StatusCode::OK);
    parse(&body)
}

async fn upsert(app: &Router, member_id: &str, date: &str, mood: i32) -> (StatusCode, UpsertHealthEntryResponse) {
    let (status, body) = send(
        app,
        Method::PUT,
        "/api/entries",
        Some(JACK),
        Some(json!({
            "family_member_id": member_id,
            "date": date,
            "mood": mood,
            "energy": 6,
            "inflammation": 2,
        })),
    )
    .await;
    (status, parse(&body))
}

#[tokio::test]
async fn test_bootstrap_creates_family_once() {
    let app = test_app().await;

    let first = bootstrap(&app).await;
    let second = bootstrap(&app).await;

    assert_eq!(first.family.name, "Jack Family");
    assert_eq!(first, second);

    let (status, body) = send(&app, Method::GET, "/api/members/me", Some(JACK), None).await;
    assert_eq!(status, StatusCode::OK);
    let me: MyMemberResponse = parse(&body);
    assert_eq!(me.member, first.member);
}

#[tokio::test]
async fn test_anonymous_requests() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/api/families/bootstrap", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "Unauthorized");

    // Anonymous callers simply have no member
    let (status, body) = send(&app, Method::GET, "/api/members/me", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let me: MyMemberResponse = parse(&body);
    assert!(me.member.is_none());

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/entries",
        None,
        Some(json!({ "family_member_id": "member::x", "date": "2026-02-13" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upsert_twice_keeps_one_entry() {
    let app = test_app().await;
    let member = bootstrap(&app).await.member.unwrap();

    let (status, first) = upsert(&app, &member.id, "2026-02-13", 7).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(first.created);

    let (status, second) = upsert(&app, &member.id, "2026-02-13", 8).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!second.created);
    assert_eq!(second.entry_id, first.entry_id);

    let uri = format!("/api/members/{}/entries/2026-02-13", member.id);
    let (status, body) = send(&app, Method::GET, &uri, Some(JACK), None).await;
    assert_eq!(status, StatusCode::OK);
    let stored: HealthEntryResponse = parse(&body);
    let stored = stored.entry.unwrap();
    assert_eq!(stored.mood, Some(8));
    assert_eq!(stored.created_at, first.entry.created_at);

    let uri = format!("/api/members/{}/entries", member.id);
    let (_, body) = send(&app, Method::GET, &uri, Some(JACK), None).await;
    let list: HealthEntryListResponse = parse(&body);
    assert_eq!(list.entries.len(), 1);
}

#[tokio::test]
async fn test_upsert_errors() {
    let app = test_app().await;
    let member = bootstrap(&app).await.member.unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/entries",
        Some(JACK),
        Some(json!({ "family_member_id": member.id, "date": "13/02/2026" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "Date must be in YYYY-MM-DD format");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/entries",
        Some(JACK),
        Some(json!({ "family_member_id": "member::missing", "date": "2026-02-13" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recent_entries_and_timeline_newest_first() {
    let app = test_app().await;
    let member = bootstrap(&app).await.member.unwrap();

    for (date, mood) in [("2026-02-12", 4), ("2026-02-13", 9), ("2026-02-11", 2)] {
        upsert(&app, &member.id, date, mood).await;
    }

    let uri = format!("/api/members/{}/entries", member.id);
    let (_, body) = send(&app, Method::GET, &uri, Some(JACK), None).await;
    let list: HealthEntryListResponse = parse(&body);
    let dates: Vec<&str> = list.entries.iter().map(|e| e.date.as_str()).collect();
    assert_eq!(dates, vec!["2026-02-13", "2026-02-12", "2026-02-11"]);

    let uri = format!("/api/members/{}/timeline", member.id);
    let (status, body) = send(&app, Method::GET, &uri, Some(JACK), None).await;
    assert_eq!(status, StatusCode::OK);
    let timeline: TimelineResponse = parse(&body);
    assert_eq!(timeline.days.len(), 3);
    assert_eq!(timeline.days[0].formatted_date, "Friday, Feb 13, 2026");
    assert_eq!(timeline.days[0].mood.as_deref(), Some("9/10 😄"));
    assert_eq!(timeline.days[2].mood.as_deref(), Some("2/10 😢"));
}

#[tokio::test]
async fn test_add_child_and_log_for_them() {
    let app = test_app().await;
    bootstrap(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/families/members",
        Some(JACK),
        Some(json!({ "name": "Mia", "date_of_birth": "2019-05-04", "avatar_emoji": "🦄" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let child: FamilyMemberResponse = parse(&body);
    assert!(child.member.is_child);

    let (_, body) = send(&app, Method::GET, "/api/families/members", Some(JACK), None).await;
    let members: FamilyMemberListResponse = parse(&body);
    assert_eq!(members.members.len(), 2);

    let (status, entry) = upsert(&app, &child.member.id, "2026-02-13", 6).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry.entry.logged_by, JACK);
}

#[tokio::test]
async fn test_intake_logging() {
    let app = test_app().await;
    let member = bootstrap(&app).await.member.unwrap();
    let (_, entry) = upsert(&app, &member.id, "2026-02-13", 7).await;

    let uri = format!("/api/entries/{}/foods", entry.entry_id);
    let (status, _) = send(
        &app,
        Method::POST,
        &uri,
        Some(JACK),
        Some(json!({ "meal_type": "breakfast", "description": "Oatmeal" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/entries/{}/medications", entry.entry_id);
    let (status, _) = send(
        &app,
        Method::POST,
        &uri,
        Some(JACK),
        Some(json!({ "medication_name": "Mesalamine", "dosage": "800mg", "taken": true, "scheduled_time": "08:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/entries/{}/intake", entry.entry_id);
    let (status, body) = send(&app, Method::GET, &uri, Some(JACK), None).await;
    assert_eq!(status, StatusCode::OK);
    let intake: IntakeListResponse = parse(&body);
    assert_eq!(intake.foods.len(), 1);
    assert_eq!(intake.foods[0].date, "2026-02-13");
    assert_eq!(intake.foods[0].family_member_id, member.id);
    assert!(intake.vitamins.is_empty());
    assert_eq!(intake.medications.len(), 1);

    let (status, _) = send(&app, Method::GET, "/api/entries/entry::missing/intake", Some(JACK), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_medication_schedule_lifecycle() {
    let app = test_app().await;
    let member = bootstrap(&app).await.member.unwrap();
    let uri = format!("/api/members/{}/medication-schedules", member.id);

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(JACK),
        Some(json!({
            "medication_name": "Vitamin D",
            "dosage": "1000 IU",
            "frequency": "daily",
            "times": ["09:00"],
            "start_date": "2026-02-01",
            "reminder_enabled": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let schedule: MedicationSchedule = parse(&body);

    let deactivate = format!("/api/medication-schedules/{}/deactivate", schedule.id);
    let (status, _) = send(&app, Method::PUT, &deactivate, Some(JACK), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, &format!("{uri}?active_only=true"), Some(JACK), None).await;
    let active: MedicationScheduleListResponse = parse(&body);
    assert!(active.schedules.is_empty());

    let (_, body) = send(&app, Method::GET, &uri, Some(JACK), None).await;
    let all: MedicationScheduleListResponse = parse(&body);
    assert_eq!(all.schedules.len(), 1);
    assert!(!all.schedules[0].active);
}

#[tokio::test]
async fn test_insight_dismissal() {
    let app = test_app().await;
    let member = bootstrap(&app).await.member.unwrap();
    let uri = format!("/api/members/{}/insights", member.id);

    let (status, _) = send(
        &app,
        Method::POST,
        &uri,
        Some(JACK),
        Some(json!({
            "insight_type": "correlation",
            "title": "Dairy and inflammation",
            "description": "Inflammation was higher on days with dairy",
            "confidence": 2.0,
            "data_points": 14,
            "date_range": { "start": "2026-01-01", "end": "2026-01-14" },
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(JACK),
        Some(json!({
            "insight_type": "correlation",
            "title": "Dairy and inflammation",
            "description": "Inflammation was higher on days with dairy",
            "confidence": 0.7,
            "data_points": 14,
            "date_range": { "start": "2026-01-01", "end": "2026-01-14" },
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let insight: Value = parse(&body);
    let insight_id = insight["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::PUT, &format!("/api/insights/{insight_id}/dismiss"), Some(JACK), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, &uri, Some(JACK), None).await;
    let visible: InsightListResponse = parse(&body);
    assert!(visible.insights.is_empty());

    let (_, body) = send(&app, Method::GET, &format!("{uri}?include_dismissed=true"), Some(JACK), None).await;
    let all: InsightListResponse = parse(&body);
    assert_eq!(all.insights.len(), 1);
}

#[tokio::test]
async fn test_malformed_body_returns_error_json() {
    let app = test_app().await;
    let member = bootstrap(&app).await.member.unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/entries",
        Some(JACK),
        Some(json!({ "family_member_id": member.id, "date": "2026-02-13", "bowel_quality": "watery" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = parse(&body);
    assert!(error.error.contains("unknown variant `watery`"));

    let uri = format!("/api/members/{}/entries", member.id);
    let (_, body) = send(&app, Method::GET, &uri, Some(JACK), None).await;
    let list: HealthEntryListResponse = parse(&body);
    assert!(list.entries.is_empty());
}

#[tokio::test]
async fn test_fractional_metric_is_rejected_as_json_error() {
    let app = test_app().await;
    let member = bootstrap(&app).await.member.unwrap();

    // Metrics are whole steps on the 1-10 scale
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/entries",
        Some(JACK),
        Some(json!({ "family_member_id": member.id, "date": "2026-02-13", "mood": 7.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = parse(&body);
    assert!(error.error.contains("mood"));
}

#[tokio::test]
async fn test_missing_content_type_returns_error_json() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/families/members")
        .header("x-identity-subject", JACK)
        .body(Body::from(r#"{"name":"Mia"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: ErrorResponse = parse(&bytes);
    assert!(!error.error.is_empty());
}
