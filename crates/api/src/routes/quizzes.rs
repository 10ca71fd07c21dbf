//! Route definitions for the `/quizzes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::quizzes;
use crate::state::AppState;

/// Routes mounted at `/quizzes`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(quizzes::overview))
}
