//! Handlers for the caller's courses (saved plans) and their details.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use learnpath_core::error::CoreError;
use learnpath_core::progress::progress_percent;
use learnpath_core::types::DbId;
use learnpath_db::models::lesson::Lesson;
use learnpath_db::models::note::{CreateNote, NoteWithTopic};
use learnpath_db::models::plan::Plan;
use learnpath_db::repositories::{LessonRepo, ModuleRepo, NoteRepo, PlanRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One module with its lessons, for course detail.
#[derive(Debug, Serialize)]
pub struct ModuleDetail {
    pub id: DbId,
    pub module_number: i32,
    pub module_title: String,
    pub lessons: Vec<Lesson>,
}

/// Full course detail: the plan, its modules in order, and its notes.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub plan: Plan,
    pub modules: Vec<ModuleDetail>,
    pub notes: Vec<NoteWithTopic>,
}

/// Request body for `POST /courses/{plan_id}/notes`.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub lesson_id: Option<DbId>,
    pub title: Option<String>,
    pub body: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/courses
///
/// The caller's plans, newest first.
pub async fn list_courses(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Plan>>>> {
    let plans = PlanRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// GET /api/v1/courses/{plan_id}
///
/// Full detail for one owned plan. Progress is recomputed from lesson
/// completion and written back only when the stored value is stale.
pub async fn course_details(
    State(state): State<AppState>,
    user: AuthUser,
    Path(plan_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CourseDetail>>> {
    let mut plan = PlanRepo::find_owned(&state.pool, plan_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "plan",
            id: plan_id,
        }))?;

    let counts = PlanRepo::lesson_counts(&state.pool, plan_id).await?;
    let progress = progress_percent(counts.completed, counts.total);
    if progress != plan.progress {
        PlanRepo::set_progress(&state.pool, plan_id, progress).await?;
        plan.progress = progress;
    }

    let modules = ModuleRepo::list_by_plan(&state.pool, plan_id).await?;
    let mut detailed = Vec::with_capacity(modules.len());
    for module in modules {
        let lessons = LessonRepo::list_by_module(&state.pool, module.id).await?;
        detailed.push(ModuleDetail {
            id: module.id,
            module_number: module.module_number,
            module_title: module.module_title,
            lessons,
        });
    }

    let notes = NoteRepo::list_by_plan_with_topic(&state.pool, plan_id).await?;

    Ok(Json(DataResponse {
        data: CourseDetail {
            plan,
            modules: detailed,
            notes,
        },
    }))
}

/// DELETE /api/v1/courses/{plan_id}
///
/// Transactional cascade delete of an owned plan and everything under
/// it. Returns 204.
pub async fn delete_course(
    State(state): State<AppState>,
    user: AuthUser,
    Path(plan_id): Path<DbId>,
) -> AppResult<StatusCode> {
    // Ownership check first so other users' plan ids read as absent.
    PlanRepo::find_owned(&state.pool, plan_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "plan",
            id: plan_id,
        }))?;

    PlanRepo::delete_cascade(&state.pool, plan_id).await?;
    tracing::info!(user_id = user.user_id, plan_id, "Deleted plan");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/courses/{plan_id}/notes
///
/// Attach a study note to a lesson of an owned plan.
pub async fn create_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(plan_id): Path<DbId>,
    Json(input): Json<CreateNoteRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<learnpath_db::models::note::Note>>)> {
    let lesson_id = input
        .lesson_id
        .ok_or_else(|| AppError::BadRequest("lesson_id is required".into()))?;
    let title = input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("title is required".into()))?;
    let body = input
        .body
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::BadRequest("body is required".into()))?;

    PlanRepo::find_owned(&state.pool, plan_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "plan",
            id: plan_id,
        }))?;

    // The lesson must sit inside the same plan.
    let owning_plan = LessonRepo::plan_id_of(&state.pool, lesson_id).await?;
    if owning_plan != Some(plan_id) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "lesson",
            id: lesson_id,
        }));
    }

    let note = NoteRepo::create(
        &state.pool,
        &CreateNote {
            user_id: user.user_id,
            plan_id,
            lesson_id,
            title: title.to_string(),
            body: body.to_string(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}
