//! Repository for the `lessons` table.

use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::lesson::Lesson;
use crate::repositories::PlanRepo;

const COLUMNS: &str = "id, module_id, day_of_plan, topic, description, youtube_link, \
    is_completed, status, last_updated";

/// CRUD operations for lessons. Creation and deletion happen through
/// [`PlanRepo`]'s tree operations; this repo covers per-lesson reads
/// and field updates.
pub struct LessonRepo;

impl LessonRepo {
    /// List a module's lessons in day order.
    pub async fn list_by_module(
        pool: &PgPool,
        module_id: DbId,
    ) -> Result<Vec<Lesson>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lessons WHERE module_id = $1 ORDER BY day_of_plan"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(module_id)
            .fetch_all(pool)
            .await
    }

    /// Find a lesson only if its plan is owned by the given user.
    ///
    /// Ownership is resolved through the module -> plan chain; a lesson
    /// that exists but belongs to someone else reads as absent.
    pub async fn find_owned(
        pool: &PgPool,
        lesson_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM lessons l
             JOIN modules m ON m.id = l.module_id
             JOIN plans p ON p.id = m.plan_id
             WHERE l.id = $1 AND p.user_id = $2",
            qualified_columns()
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(lesson_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// The id of the plan a lesson belongs to, if the lesson exists.
    pub async fn plan_id_of(
        pool: &PgPool,
        lesson_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT m.plan_id FROM lessons l
             JOIN modules m ON m.id = l.module_id
             WHERE l.id = $1",
        )
        .bind(lesson_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Set a lesson's completion flag and recompute the owning plan's
    /// progress, both inside one transaction. Returns the new progress.
    pub async fn set_completion(
        pool: &PgPool,
        lesson_id: DbId,
        plan_id: DbId,
        is_completed: bool,
    ) -> Result<i32, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE lessons SET is_completed = $2, last_updated = NOW() WHERE id = $1",
        )
        .bind(lesson_id)
        .bind(is_completed)
        .execute(&mut *tx)
        .await?;

        let progress = PlanRepo::recount_progress_on(&mut *tx, plan_id).await?;

        tx.commit().await?;
        Ok(progress)
    }

    /// Update a lesson's free-text workflow status, returning the
    /// fresh row. `None` if the lesson does not exist.
    pub async fn set_status(
        pool: &PgPool,
        lesson_id: DbId,
        status: &str,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!(
            "UPDATE lessons SET status = $2, last_updated = NOW() WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(lesson_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Persist a resolved video link, touching only that field (the
    /// merge-write of the enrichment flow).
    pub async fn set_youtube_link(
        pool: &PgPool,
        lesson_id: DbId,
        youtube_link: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE lessons SET youtube_link = $2, last_updated = NOW() WHERE id = $1",
        )
        .bind(lesson_id)
        .bind(youtube_link)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// `l.`-qualified column list for joined lesson queries.
fn qualified_columns() -> String {
    COLUMNS
        .split(", ")
        .map(|c| format!("l.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}
