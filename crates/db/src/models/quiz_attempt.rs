//! Quiz attempt model (append-only).

use learnpath_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `quiz_attempts` table. Never mutated or deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuizAttempt {
    pub id: DbId,
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub plan_id: DbId,
    pub score: i32,
    pub total: i32,
    pub submitted_at: Timestamp,
}

/// An attempt joined with its lesson's topic; the lesson may have been
/// deleted since the attempt was recorded.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttemptWithTopic {
    pub id: DbId,
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub plan_id: DbId,
    pub score: i32,
    pub total: i32,
    pub submitted_at: Timestamp,
    pub topic: Option<String>,
}

/// Per-user raw-score sum across all attempts, for the leaderboard.
#[derive(Debug, Clone, FromRow)]
pub struct UserScoreRow {
    pub user_id: DbId,
    pub username: Option<String>,
    pub total_score: i64,
}

/// DTO for recording an attempt.
#[derive(Debug)]
pub struct CreateQuizAttempt {
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub plan_id: DbId,
    pub score: i32,
    pub total: i32,
}
