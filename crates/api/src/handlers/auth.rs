//! Handlers for the `/auth` resource (register, login, refresh,
//! logout, identity check).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use learnpath_core::error::CoreError;
use learnpath_core::types::DbId;
use learnpath_db::models::user::{CreateUser, LoginField};
use learnpath_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// Generic message for any credential failure, so responses never
/// reveal which part of the login was wrong.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub education: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login_type: String,
    pub login_value: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub name: String,
}

/// Response for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<MeUser>,
}

#[derive(Debug, Serialize)]
pub struct MeUser {
    pub id: DbId,
    pub username: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a new account. Email and username must be unique; the
/// password and its confirmation must match.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<StatusCode> {
    let email = input.email.trim().to_string();
    let username = input.username.trim().to_string();

    if email.is_empty() || username.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email, username, and password are required".into(),
        )));
    }
    if input.password != input.confirm_password {
        return Err(AppError::Core(CoreError::Validation(
            "Passwords do not match".into(),
        )));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // Checked up front for friendly messages; the unique indexes still
    // back this against races.
    if UserRepo::email_exists(&state.pool, &email).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }
    if UserRepo::username_exists(&state.pool, &username).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "This username is already taken".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            username,
            password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            phone_number: input.phone_number.trim().to_string(),
            date_of_birth: input.date_of_birth.trim().to_string(),
            education: input.education.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Registered new user");
    Ok(StatusCode::CREATED)
}

/// POST /api/v1/auth/login
///
/// Authenticate with username, email, or phone number plus password.
/// Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let login_value = input.login_value.trim();
    if login_value.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Login value and password are required".into(),
        )));
    }

    let field = LoginField::parse(&input.login_type).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown login type '{}'",
            input.login_type
        )))
    })?;

    // The same 401 whether the account is missing or the password is
    // wrong.
    let user = UserRepo::find_by_login_field(&state.pool, field, login_value)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let response = create_auth_response(
        &state,
        user.id,
        &user.username,
        &user.email,
        &user.display_name(),
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Token rotation: the presented token is single-use.
    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(
        &state,
        user.id,
        &user.username,
        &user.email,
        &user.display_name(),
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No
/// Content and is idempotent.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// Report whether the caller presented a valid token. Anonymous
/// callers get `authenticated: false` with a 200, not a 401, so the
/// client can use this as a session probe.
pub async fn me(MaybeAuthUser(user): MaybeAuthUser) -> Json<MeResponse> {
    match user {
        Some(user) => Json(MeResponse {
            authenticated: true,
            user: Some(MeUser {
                id: user.user_id,
                username: user.username,
                name: user.name,
            }),
        }),
        None => Json(MeResponse {
            authenticated: false,
            user: None,
        }),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build
/// the response.
async fn create_auth_response(
    state: &AppState,
    user_id: DbId,
    username: &str,
    email: &str,
    name: &str,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user_id, username, name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = learnpath_db::models::session::CreateSession {
        user_id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: UserInfo {
            id: user_id,
            username: username.to_string(),
            email: email.to_string(),
            name: name.to_string(),
        },
    })
}
