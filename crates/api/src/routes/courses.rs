//! Route definitions for the `/courses` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`. All require auth and are
/// ownership-gated.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses))
        .route(
            "/{plan_id}",
            get(courses::course_details).delete(courses::delete_course),
        )
        .route("/{plan_id}/notes", post(courses::create_note))
}
