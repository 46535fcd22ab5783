use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use eventboard_core::db::open_db_in_memory;
use eventboard_server::routes::build_router;
use eventboard_server::state::AppState;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    let conn = open_db_in_memory().unwrap();
    build_router(AppState::new(conn))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_attendee(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/attendees",
        Some(json!({ "name": name, "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_ok_and_version() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(!body["version"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn event_crud_round_trip() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({
            "name": "Launch party",
            "location": "Rooftop",
            "date": "2024-06-15"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Launch party");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, Method::GET, "/api/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/events/{id}"),
        Some(json!({ "name": "Launch party (moved)", "location": "Lobby" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Launch party (moved)");
    assert_eq!(updated["location"], "Lobby");
    assert_eq!(updated["date"], Value::Null);

    let (status, deleted) = send(&app, Method::DELETE, &format!("/api/events/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(deleted["message"].as_str().unwrap().contains("deleted"));

    let (_, listed) = send(&app, Method::GET, "/api/events", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn event_validation_and_not_found_errors() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({ "name": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let missing = Uuid::new_v4();
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/events/{missing}"),
        Some(json!({ "name": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));

    let (status, _) = send(&app, Method::DELETE, &format!("/api/events/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn attendee_envelope_and_duplicate_email() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/attendees",
        Some(json!({ "name": "Ana", "email": "ana@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["name"], "Ana");
    assert_eq!(created["data"]["assignedTasks"], json!([]));

    // Uniqueness is case-insensitive.
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendees",
        Some(json!({ "name": "Ana Clone", "email": "ANA@X.COM" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    let (status, listed) = send(&app, Method::GET, "/api/attendees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn attendee_validation_errors() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/attendees",
        Some(json!({ "name": "Ana" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/attendees",
        Some(json!({ "name": "Ana", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn task_lifecycle_over_http() {
    let app = app();
    let ana = create_attendee(&app, "Ana", "ana@x.com").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({
            "name": "Setup booth",
            "deadline": "2024-05-01",
            "assignedAttendees": [ana]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["status"], "Pending");
    assert_eq!(created["data"]["assignedAttendees"], json!([ana]));
    let task_id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["task"].as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/tasks/{task_id}"),
        Some(json!({ "status": "Done" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], "Done");
    assert_eq!(updated["data"]["assignedAttendees"], json!([ana]));

    let (status, deleted) = send(&app, Method::DELETE, &format!("/api/tasks/{task_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(deleted["message"].as_str().unwrap().contains("deleted"));

    // The cascade stripped the task from the attendee's reference list.
    let (_, attendees) = send(&app, Method::GET, "/api/attendees", None).await;
    assert_eq!(attendees["data"][0]["assignedTasks"], json!([]));
}

#[tokio::test]
async fn task_validation_errors_over_http() {
    let app = app();
    let ana = create_attendee(&app, "Ana", "ana@x.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({ "name": "No attendees", "deadline": "2024-05-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("attendee"));

    let ghost = Uuid::new_v4();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({
            "name": "Ghost crew",
            "deadline": "2024-05-01",
            "assignedAttendees": [ghost]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({
            "name": "Setup booth",
            "deadline": "2024-05-01",
            "assignedAttendees": [ana]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/tasks/{task_id}"),
        Some(json!({ "status": "Cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Cancelled"));

    let missing = Uuid::new_v4();
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/tasks/{missing}"),
        Some(json!({ "status": "Done" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/tasks/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tasks_filtered_by_event_id() {
    let app = app();
    let ana = create_attendee(&app, "Ana", "ana@x.com").await;

    let (status, event) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({ "name": "Conference" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let event_id = event["id"].as_str().unwrap().to_string();

    let (status, in_event) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({
            "name": "Setup booth",
            "deadline": "2024-05-01",
            "assignedAttendees": [ana],
            "event": event_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({
            "name": "Unrelated",
            "deadline": "2024-05-02",
            "assignedAttendees": [ana]
        })),
    )
    .await;

    let (status, filtered) = send(&app, Method::GET, &format!("/api/tasks/{event_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = filtered["task"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], in_event["data"]["id"]);

    // Unknown event ids produce an empty list, not an error.
    let unknown = Uuid::new_v4();
    let (status, empty) = send(&app, Method::GET, &format!("/api/tasks/{unknown}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(empty["task"].as_array().unwrap().is_empty());
}
