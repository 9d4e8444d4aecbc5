//! Router-level tests driven through `oneshot`, backed by the in-memory store.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;
use workout_log::errors::WorkoutError;
use workout_log::models::{
    FilterKind, FilteredEntry, NewWorkout, WorkoutChanges, WorkoutEntry, WorkoutSummary,
};
use workout_log::store::{MemoryStore, WorkoutStore};
use workout_log::{router, AppState};

fn seeded_app() -> Router {
    router(AppState::new(Arc::new(MemoryStore::seeded())))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn body_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn index_without_date_renders_empty_page() {
    let response = seeded_app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("<form"));
    assert!(!html.contains("data-id=\"1\""));
    assert!(!html.contains("{{"));
}

#[tokio::test]
async fn index_with_date_lists_each_set() {
    let response = seeded_app()
        .oneshot(get("/?date=2025-03-10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("data-id=\"1\""));
    assert!(html.contains("data-id=\"2\""));
    assert!(html.contains("Lat Pullover"));
    assert!(html.contains("57.5"));
    assert!(!html.contains("data-id=\"3\""));
}

#[tokio::test]
async fn add_with_missing_fields_reports_validation_error() {
    let response = seeded_app()
        .oneshot(post_form("/add-workout", "date=2025-03-12&category=Back"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response.into_body()).await;
    assert!(text.starts_with("Validation error:"));
    assert!(text.contains("\"param\":\"exercise\""));
    assert!(text.contains("\"param\":\"sets\""));
}

#[tokio::test]
async fn add_with_huge_set_count_is_rejected() {
    let app = seeded_app();

    let response = app
        .clone()
        .oneshot(post_form(
            "/add-workout",
            "date=2025-05-01&category=Legs&exercise=Squat&sets=100000000000&reps=5",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response.into_body()).await;
    assert!(text.starts_with("Validation error:"));
    assert!(text.contains("\"param\":\"sets\""));

    let page = app.oneshot(get("/?date=2025-05-01")).await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    let html = body_text(page.into_body()).await;
    assert!(html.contains("No workouts logged for this date yet."));
}

#[tokio::test]
async fn update_without_descriptors_keeps_stored_values() {
    let app = seeded_app();

    let response = app
        .clone()
        .oneshot(post_form(
            "/update-workout",
            "originalId=1&date=2025-03-10&sets=2&reps=10%2C9&weight=50%2C50&notes=lighter",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/?date=2025-03-10");

    let day = app
        .oneshot(get("/api/workouts?date=2025-03-10"))
        .await
        .unwrap();
    let body = body_json(day.into_body()).await;
    let entry = body["workouts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry["id"] == 1)
        .expect("entry 1 listed")
        .clone();
    assert_eq!(entry["category"], "Back");
    assert_eq!(entry["exercise"], "Lat Pullover");
    assert_eq!(entry["muscle_focus"], "Lower Back");
    assert_eq!(entry["notes"], "lighter");
    assert_eq!(entry["setsCount"], 2);
    assert_eq!(entry["setRows"][1]["reps"], "9");
    assert_eq!(entry["setRows"][1]["last"], true);
}

#[tokio::test]
async fn update_of_unknown_id_reports_missing_values() {
    let response = seeded_app()
        .oneshot(post_form("/update-workout", "originalId=404&date=2025-03-10&sets=1&reps=5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response.into_body()).await,
        "Error updating workout: Could not retrieve current values"
    );
}

#[tokio::test]
async fn delete_of_unknown_id_is_reported() {
    let response = seeded_app()
        .oneshot(post_form("/delete-workout", "originalId=99&date=2025-03-10"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response.into_body()).await,
        "No workout deleted. ID 99 might not exist."
    );
}

#[tokio::test]
async fn delete_removes_entry_and_redirects() {
    let app = seeded_app();

    let response = app
        .clone()
        .oneshot(post_form("/delete-workout", "originalId=2&date=2025-03-10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/?date=2025-03-10");

    let day = app
        .oneshot(get("/api/workouts?date=2025-03-10"))
        .await
        .unwrap();
    let body = body_json(day.into_body()).await;
    let ids: Vec<_> = body["workouts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn delete_with_unparseable_date_redirects_home() {
    let response = seeded_app()
        .oneshot(post_form("/delete-workout", "originalId=3&date=someday"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn day_api_rejects_bad_date() {
    let response = seeded_app()
        .oneshot(get("/api/workouts?date=2025-13-40"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn filter_without_params_is_bad_request() {
    let response = seeded_app()
        .oneshot(get("/api/workouts/filter?type=category"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("\"param\":\"value\""));
}

#[tokio::test]
async fn filter_by_category_groups_with_related_ids() {
    let response = seeded_app()
        .oneshot(get("/api/workouts/filter?type=category&value=Back"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    let groups = body["workoutsByDate"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["date"], "2025-03-10");
    assert_eq!(groups[0]["workouts"].as_array().unwrap().len(), 2);
    assert_eq!(groups[0]["relatedIds"], serde_json::json!(["1", "2"]));
    assert_eq!(groups[0]["allWorkouts"][0]["setRows"][0]["setRowId"], "1-1");
}

/// Every query fails as if the database went away.
struct FailingStore;

fn broken(op: &'static str) -> WorkoutError {
    WorkoutError::storage(op)(sqlx::Error::PoolClosed)
}

#[async_trait]
impl WorkoutStore for FailingStore {
    async fn list_by_date(&self, _date: NaiveDate) -> Result<Vec<WorkoutEntry>, WorkoutError> {
        Err(broken("list"))
    }

    async fn insert(&self, _workout: &NewWorkout) -> Result<i64, WorkoutError> {
        Err(broken("insert"))
    }

    async fn update(&self, _id: i64, _changes: &WorkoutChanges) -> Result<bool, WorkoutError> {
        Err(broken("update"))
    }

    async fn delete(&self, _id: i64) -> Result<u64, WorkoutError> {
        Err(broken("delete"))
    }

    async fn get_summary(&self, _id: i64) -> Result<Option<WorkoutSummary>, WorkoutError> {
        Err(broken("summary"))
    }

    async fn filter(
        &self,
        _kind: FilterKind,
        _value: &str,
    ) -> Result<Vec<FilteredEntry>, WorkoutError> {
        Err(broken("filter"))
    }
}

fn failing_app() -> Router {
    router(AppState::new(Arc::new(FailingStore)))
}

#[tokio::test]
async fn filter_storage_failure_is_a_database_error() {
    let response = failing_app()
        .oneshot(get("/api/workouts/filter?type=movement&value=Squat"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response.into_body()).await;
    assert_eq!(body, serde_json::json!({ "error": "Database error" }));
}

#[tokio::test]
async fn form_storage_failures_use_generic_messages() {
    let add = failing_app()
        .oneshot(post_form(
            "/add-workout",
            "date=2025-03-12&category=Legs&exercise=Squat&sets=1&reps=5",
        ))
        .await
        .unwrap();
    assert_eq!(add.status(), StatusCode::OK);
    assert_eq!(body_text(add.into_body()).await, "Error adding workout");

    let index = failing_app()
        .oneshot(get("/?date=2025-03-12"))
        .await
        .unwrap();
    assert_eq!(body_text(index.into_body()).await, "Error fetching workouts");
}
