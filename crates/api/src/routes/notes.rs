//! Route definitions for the `/notes` resource.

use axum::routing::delete;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(notes::delete_note))
}
