//! Route table for the REST API.

use axum::routing::{get, put};
use axum::Router;

use crate::state::AppState;

pub mod attendees;
pub mod events;
pub mod health;
pub mod tasks;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route(
            "/api/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/api/events/:id",
            put(events::update_event).delete(events::delete_event),
        )
        .route(
            "/api/attendees",
            get(attendees::list_attendees).post(attendees::create_attendee),
        )
        .route("/api/attendees/:id", axum::routing::delete(attendees::delete_attendee))
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/:id",
            get(tasks::list_tasks_for_event)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .with_state(state)
}
