//! Repository for the `quiz_attempts` table (append-only).

use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::quiz_attempt::{
    AttemptWithTopic, CreateQuizAttempt, QuizAttempt, UserScoreRow,
};

const COLUMNS: &str = "id, user_id, lesson_id, plan_id, score, total, submitted_at";

/// Append and read operations for quiz attempts. There is no update or
/// delete: history is immutable.
pub struct QuizAttemptRepo;

impl QuizAttemptRepo {
    /// Record one attempt.
    pub async fn create(
        pool: &PgPool,
        input: &CreateQuizAttempt,
    ) -> Result<QuizAttempt, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_attempts (user_id, lesson_id, plan_id, score, total)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuizAttempt>(&query)
            .bind(input.user_id)
            .bind(input.lesson_id)
            .bind(input.plan_id)
            .bind(input.score)
            .bind(input.total)
            .fetch_one(pool)
            .await
    }

    /// A user's attempts newest-first, joined with lesson topics. The
    /// join is LEFT so attempts against deleted lessons still appear.
    pub async fn list_by_user_with_topic(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AttemptWithTopic>, sqlx::Error> {
        sqlx::query_as::<_, AttemptWithTopic>(
            "SELECT a.id, a.user_id, a.lesson_id, a.plan_id, a.score, a.total,
                    a.submitted_at, l.topic AS topic
             FROM quiz_attempts a
             LEFT JOIN lessons l ON l.id = a.lesson_id
             WHERE a.user_id = $1
             ORDER BY a.submitted_at DESC, a.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Raw-score sums per user across every attempt, for the global
    /// leaderboard. Users whose account was deleted come back with a
    /// NULL username.
    pub async fn score_totals(pool: &PgPool) -> Result<Vec<UserScoreRow>, sqlx::Error> {
        sqlx::query_as::<_, UserScoreRow>(
            "SELECT a.user_id, u.username AS username,
                    SUM(a.score)::BIGINT AS total_score
             FROM quiz_attempts a
             LEFT JOIN users u ON u.id = a.user_id
             GROUP BY a.user_id, u.username",
        )
        .fetch_all(pool)
        .await
    }
}
