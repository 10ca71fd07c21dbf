//! Route definitions for the `/account` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/account`. All require auth.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", delete(account::delete_account))
        .route(
            "/profile",
            get(account::get_profile).put(account::update_profile),
        )
        .route("/password", put(account::change_password))
        .route("/plans", delete(account::delete_all_plans))
}
