//! Handlers for quiz attempts, per-user history, and the global
//! leaderboard.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use learnpath_core::leaderboard::{build_leaderboard, LeaderboardEntry, UserScoreTotal};
use learnpath_core::quiz::{attempt_percent, summarize_attempts, QuizStats};
use learnpath_core::types::{DbId, Timestamp};
use learnpath_db::models::quiz_attempt::{CreateQuizAttempt, QuizAttempt};
use learnpath_db::repositories::QuizAttemptRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::lessons::find_owned_lesson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Topic shown for attempts whose lesson has since been deleted.
const UNKNOWN_TOPIC: &str = "Unknown Topic";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /lessons/{id}/quiz-attempts`.
#[derive(Debug, Deserialize)]
pub struct RecordAttemptRequest {
    pub score: Option<i32>,
    pub total: Option<i32>,
    pub plan_id: Option<DbId>,
}

/// One attempt in the history list.
#[derive(Debug, Serialize)]
pub struct AttemptView {
    pub id: DbId,
    pub lesson_id: DbId,
    pub plan_id: DbId,
    pub topic: String,
    pub score: i32,
    pub total: i32,
    /// `round(100 * score / total)`.
    pub percent: i32,
    pub submitted_at: Timestamp,
}

/// Response for `GET /quizzes`.
#[derive(Debug, Serialize)]
pub struct QuizOverview {
    pub attempts: Vec<AttemptView>,
    pub stats: QuizStats,
    /// Topic of the most recent attempt, if any.
    pub last_topic: Option<String>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/lessons/{id}/quiz-attempts
///
/// Append one immutable attempt. History is never updated or deleted.
pub async fn record_attempt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lesson_id): Path<DbId>,
    Json(input): Json<RecordAttemptRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<QuizAttempt>>)> {
    let score = input
        .score
        .ok_or_else(|| AppError::BadRequest("score is required".into()))?;
    let total = input
        .total
        .ok_or_else(|| AppError::BadRequest("total is required".into()))?;
    let plan_id = input
        .plan_id
        .ok_or_else(|| AppError::BadRequest("plan_id is required".into()))?;
    if score < 0 || total < 0 || score > total {
        return Err(AppError::BadRequest(
            "score must be between 0 and total".into(),
        ));
    }

    find_owned_lesson(&state, lesson_id, user.user_id).await?;

    let attempt = QuizAttemptRepo::create(
        &state.pool,
        &CreateQuizAttempt {
            user_id: user.user_id,
            lesson_id,
            plan_id,
            score,
            total,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: attempt })))
}

/// GET /api/v1/quizzes
///
/// The caller's attempt history with aggregates, plus the global
/// top-five leaderboard of raw-score sums. The leaderboard scans the
/// whole attempts table, which is fine at this application's scale.
pub async fn overview(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<QuizOverview>>> {
    let rows = QuizAttemptRepo::list_by_user_with_topic(&state.pool, user.user_id).await?;

    let attempts: Vec<AttemptView> = rows
        .into_iter()
        .map(|row| AttemptView {
            id: row.id,
            lesson_id: row.lesson_id,
            plan_id: row.plan_id,
            topic: row.topic.unwrap_or_else(|| UNKNOWN_TOPIC.to_string()),
            score: row.score,
            total: row.total,
            percent: attempt_percent(row.score as i64, row.total as i64),
            submitted_at: row.submitted_at,
        })
        .collect();

    let percents: Vec<i32> = attempts.iter().map(|a| a.percent).collect();
    let stats = summarize_attempts(&percents);
    let last_topic = attempts.first().map(|a| a.topic.clone());

    let totals = QuizAttemptRepo::score_totals(&state.pool)
        .await?
        .into_iter()
        .map(|row| UserScoreTotal {
            user_id: row.user_id,
            username: row.username,
            total_score: row.total_score,
        })
        .collect();
    let leaderboard = build_leaderboard(totals);

    Ok(Json(DataResponse {
        data: QuizOverview {
            attempts,
            stats,
            last_topic,
            leaderboard,
        },
    }))
}
