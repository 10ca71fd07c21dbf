pub mod account;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod health;
pub mod lessons;
pub mod notes;
pub mod plans;
pub mod quizzes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           identity probe (auth optional)
///
/// /plans/generate                    generate a plan via the LLM (POST)
/// /plans                             persist a generated plan (POST)
/// /plans/recommendations             popular plan titles (GET)
///
/// /courses                           caller's plans (GET)
/// /courses/{plan_id}                 course detail (GET), cascade delete (DELETE)
/// /courses/{plan_id}/notes           create note (POST)
///
/// /lessons/{id}                      lesson detail (GET)
/// /lessons/{id}/completion           toggle + progress recount (POST)
/// /lessons/{id}/status               status update (POST)
/// /lessons/{id}/notes                caller's notes on the lesson (GET)
/// /lessons/{id}/video                resolve + cache a video (POST)
/// /lessons/{id}/transcript           caption transcript (POST)
/// /lessons/{id}/summary-quiz         generated summary + quiz (POST)
/// /lessons/{id}/quiz-attempts        record an attempt (POST)
///
/// /quizzes                           attempt history + leaderboard (GET)
///
/// /notes/{id}                        delete a note (DELETE)
///
/// /account/profile                   get, update profile
/// /account/password                  change password (PUT)
/// /account/plans                     delete all plans (DELETE)
/// /account                           delete account (DELETE)
///
/// /dashboard                         home-screen summary (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/plans", plans::router())
        .nest("/courses", courses::router())
        .nest("/lessons", lessons::router())
        .nest("/quizzes", quizzes::router())
        .nest("/notes", notes::router())
        .nest("/account", account::router())
        .nest("/dashboard", dashboard::router())
}
