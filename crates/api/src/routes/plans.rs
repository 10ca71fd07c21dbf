//! Route definitions for the `/plans` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::plans;
use crate::state::AppState;

/// Routes mounted at `/plans`. All require auth.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(plans::save_plan))
        .route("/generate", post(plans::generate_plan))
        .route("/recommendations", get(plans::recommendations))
}
