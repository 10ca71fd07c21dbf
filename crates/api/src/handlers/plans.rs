//! Handlers for plan generation, persistence, and recommendations.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use learnpath_core::error::CoreError;
use learnpath_core::plan::{
    build_plan_prompt, parse_generated_plan, timeline_in_range, GeneratedPlan,
    MAX_TIMELINE_MONTHS,
};
use learnpath_core::recommend::{top_titles, RECOMMENDATION_LIMIT};
use learnpath_core::types::DbId;
use learnpath_db::repositories::PlanRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /plans/generate`.
#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    pub topic: String,
    pub difficulty: String,
    pub timeline_months: u32,
}

/// Request body for `POST /plans`.
#[derive(Debug, Deserialize)]
pub struct SavePlanRequest {
    pub plan: GeneratedPlan,
    pub difficulty: String,
    pub timeline_months: i32,
}

/// Response for `POST /plans`.
#[derive(Debug, Serialize)]
pub struct SavePlanResponse {
    pub plan_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/plans/generate
///
/// Build the generation prompt, call the LLM, and parse the first
/// balanced JSON object out of its reply. The parsed plan is returned
/// to the client without being persisted; saving is a separate call.
pub async fn generate_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<GeneratePlanRequest>,
) -> AppResult<Json<DataResponse<GeneratedPlan>>> {
    let topic = input.topic.trim();
    if topic.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Topic is required".into(),
        )));
    }
    if !timeline_in_range(input.timeline_months as i64) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Timeline must be between 1 and {MAX_TIMELINE_MONTHS} months"
        ))));
    }

    let gemini = state
        .gemini
        .as_ref()
        .ok_or_else(|| AppError::Generation("plan generation is disabled (no API key)".into()))?;

    let prompt = build_plan_prompt(topic, &input.difficulty, input.timeline_months);

    let raw = gemini
        .generate_text(&prompt)
        .await
        .map_err(|e| AppError::Generation(format!("LLM call failed: {e}")))?;

    let plan = parse_generated_plan(&raw)
        .map_err(|e| AppError::Generation(format!("could not parse generated plan: {e}")))?;

    tracing::info!(
        user_id = user.user_id,
        topic,
        lessons = plan.lesson_count(),
        "Generated plan"
    );

    Ok(Json(DataResponse { data: plan }))
}

/// POST /api/v1/plans
///
/// Persist a generated plan tree for the caller in one transaction.
pub async fn save_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SavePlanRequest>,
) -> AppResult<(StatusCode, Json<SavePlanResponse>)> {
    if input.plan.plan_title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Plan title is required".into(),
        )));
    }
    if input.plan.modules.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Plan must contain at least one module".into(),
        )));
    }
    if !timeline_in_range(input.timeline_months as i64) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Timeline must be between 1 and {MAX_TIMELINE_MONTHS} months"
        ))));
    }

    let plan_id = PlanRepo::save_tree(
        &state.pool,
        user.user_id,
        &input.plan,
        &input.difficulty,
        input.timeline_months,
    )
    .await?;

    tracing::info!(user_id = user.user_id, plan_id, "Saved plan");
    Ok((StatusCode::CREATED, Json(SavePlanResponse { plan_id })))
}

/// GET /api/v1/plans/recommendations
///
/// The most frequently created plan titles across all users. An empty
/// store yields an empty list.
pub async fn recommendations(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let titles = PlanRepo::all_titles(&state.pool).await?;
    let ranked = top_titles(titles, RECOMMENDATION_LIMIT);
    Ok(Json(DataResponse { data: ranked }))
}
