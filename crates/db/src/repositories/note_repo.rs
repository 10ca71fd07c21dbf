//! Repository for the `notes` table.

use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note, NoteWithTopic};

const COLUMNS: &str = "id, user_id, plan_id, lesson_id, title, body, created_at";

/// CRUD operations for study notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Create a new note, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (user_id, plan_id, lesson_id, title, body)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(input.user_id)
            .bind(input.plan_id)
            .bind(input.lesson_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// List a plan's notes newest-first, each annotated with its
    /// lesson's topic for display.
    pub async fn list_by_plan_with_topic(
        pool: &PgPool,
        plan_id: DbId,
    ) -> Result<Vec<NoteWithTopic>, sqlx::Error> {
        sqlx::query_as::<_, NoteWithTopic>(
            "SELECT n.id, n.user_id, n.plan_id, n.lesson_id, n.title, n.body,
                    n.created_at, l.topic AS topic
             FROM notes n
             LEFT JOIN lessons l ON l.id = n.lesson_id
             WHERE n.plan_id = $1
             ORDER BY n.created_at DESC",
        )
        .bind(plan_id)
        .fetch_all(pool)
        .await
    }

    /// List a user's notes on one lesson.
    pub async fn list_by_lesson_for_user(
        pool: &PgPool,
        lesson_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE lesson_id = $1 AND user_id = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(lesson_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a note only if it is owned by the given user. Returns
    /// `true` when a row was deleted.
    pub async fn delete_owned(
        pool: &PgPool,
        note_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(note_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of notes still referencing a plan (used in tests to
    /// verify cascade deletes).
    pub async fn count_by_plan(pool: &PgPool, plan_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes WHERE plan_id = $1")
            .bind(plan_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
