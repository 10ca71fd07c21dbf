//! Handlers for individual lessons: reads, completion toggles, status
//! updates, and per-lesson notes.

use axum::extract::{Path, State};
use axum::Json;
use learnpath_core::error::CoreError;
use learnpath_core::types::DbId;
use learnpath_db::models::lesson::Lesson;
use learnpath_db::models::note::Note;
use learnpath_db::repositories::{LessonRepo, NoteRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /lessons/{id}/completion`.
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub is_completed: Option<bool>,
    pub plan_id: Option<DbId>,
}

/// Response for `POST /lessons/{id}/completion`.
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub is_completed: bool,
    /// The owning plan's recomputed progress percentage.
    pub progress: i32,
}

/// Request body for `POST /lessons/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/lessons/{id}
///
/// One lesson, 404 unless its plan belongs to the caller.
pub async fn get_lesson(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lesson_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Lesson>>> {
    let lesson = find_owned_lesson(&state, lesson_id, user.user_id).await?;
    Ok(Json(DataResponse { data: lesson }))
}

/// POST /api/v1/lessons/{id}/completion
///
/// Toggle completion and recount the owning plan's progress in one
/// transaction. The body must name the plan the client thinks the
/// lesson belongs to; a mismatch reads as absent.
pub async fn set_completion(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lesson_id): Path<DbId>,
    Json(input): Json<CompletionRequest>,
) -> AppResult<Json<DataResponse<CompletionResponse>>> {
    let is_completed = input
        .is_completed
        .ok_or_else(|| AppError::BadRequest("is_completed is required".into()))?;
    let plan_id = input
        .plan_id
        .ok_or_else(|| AppError::BadRequest("plan_id is required".into()))?;

    find_owned_lesson(&state, lesson_id, user.user_id).await?;

    let owning_plan = LessonRepo::plan_id_of(&state.pool, lesson_id).await?;
    if owning_plan != Some(plan_id) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "lesson",
            id: lesson_id,
        }));
    }

    let progress = LessonRepo::set_completion(&state.pool, lesson_id, plan_id, is_completed).await?;

    Ok(Json(DataResponse {
        data: CompletionResponse {
            is_completed,
            progress,
        },
    }))
}

/// POST /api/v1/lessons/{id}/status
///
/// Update a lesson's free-text workflow status.
pub async fn set_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lesson_id): Path<DbId>,
    Json(input): Json<StatusRequest>,
) -> AppResult<Json<DataResponse<Lesson>>> {
    let status = input
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("status is required".into()))?;

    find_owned_lesson(&state, lesson_id, user.user_id).await?;

    let lesson = LessonRepo::set_status(&state.pool, lesson_id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "lesson",
            id: lesson_id,
        }))?;
    Ok(Json(DataResponse { data: lesson }))
}

/// GET /api/v1/lessons/{id}/notes
///
/// The caller's notes on one owned lesson, newest first.
pub async fn list_notes(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lesson_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Note>>>> {
    find_owned_lesson(&state, lesson_id, user.user_id).await?;
    let notes = NoteRepo::list_by_lesson_for_user(&state.pool, lesson_id, user.user_id).await?;
    Ok(Json(DataResponse { data: notes }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a lesson gated by ownership; shared by every lesson handler.
pub(crate) async fn find_owned_lesson(
    state: &AppState,
    lesson_id: DbId,
    user_id: DbId,
) -> AppResult<Lesson> {
    LessonRepo::find_owned(&state.pool, lesson_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "lesson",
            id: lesson_id,
        }))
}
