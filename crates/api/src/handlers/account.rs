//! Handlers for profile settings and account lifecycle.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use learnpath_core::error::CoreError;
use learnpath_db::models::user::{UpdateProfile, User};
use learnpath_db::repositories::{PlanRepo, SessionRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /account/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/account/profile
///
/// The caller's full profile. The password hash never serializes.
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let profile = load_user(&state, user.user_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/account/profile
///
/// Update name, username, and phone number. Absent fields keep their
/// stored values. Username uniqueness is backed by the unique index,
/// surfacing as 409 on conflict.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<User>>> {
    if let Some(username) = input.username.as_deref() {
        if username.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Username cannot be empty".into(),
            )));
        }
    }

    let updated = UserRepo::update_profile(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/v1/account/password
///
/// Change the caller's password. The current password must verify
/// first; a mismatch is a 403, not a 401, because the caller is
/// authenticated but not entitled to this change.
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let stored = load_user(&state, user.user_id).await?;

    let current_ok = verify_password(&input.current_password, &stored.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_ok {
        return Err(AppError::Core(CoreError::Forbidden(
            "Current password is incorrect".into(),
        )));
    }

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password_hash(&state.pool, user.user_id, &new_hash).await?;

    tracing::info!(user_id = user.user_id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/account/plans
///
/// Remove every plan the caller owns, with all descendant data, in one
/// transaction. The account itself stays.
pub async fn delete_all_plans(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<StatusCode> {
    let removed = PlanRepo::delete_all_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, removed, "Deleted all plans");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/account
///
/// Delete the account: all plans cascade first, then the user row, and
/// every session is revoked. Quiz attempts remain by design and show
/// as anonymous on the leaderboard.
pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<StatusCode> {
    PlanRepo::delete_all_for_user(&state.pool, user.user_id).await?;
    SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
    UserRepo::delete(&state.pool, user.user_id).await?;

    tracing::info!(user_id = user.user_id, "Deleted account");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_user(state: &AppState, user_id: learnpath_core::types::DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: user_id,
        }))
}
