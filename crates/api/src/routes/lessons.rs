//! Route definitions for the `/lessons` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{enrichment, lessons, quizzes};
use crate::state::AppState;

/// Routes mounted at `/lessons`. All require auth; lessons belonging
/// to other users read as absent.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(lessons::get_lesson))
        .route("/{id}/completion", post(lessons::set_completion))
        .route("/{id}/status", post(lessons::set_status))
        .route("/{id}/notes", get(lessons::list_notes))
        .route("/{id}/video", post(enrichment::resolve_video))
        .route("/{id}/transcript", post(enrichment::fetch_transcript))
        .route("/{id}/summary-quiz", post(enrichment::summary_quiz))
        .route("/{id}/quiz-attempts", post(quizzes::record_attempt))
}
