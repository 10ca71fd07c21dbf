//! Repository for the `plans` table and plan-tree wide operations.
//!
//! The plan -> module -> lesson hierarchy is written and torn down here
//! so the whole tree moves in one transaction: a generated plan is
//! either fully persisted or not at all, and a cascade delete cannot
//! leave orphan modules, lessons, or notes behind.

use learnpath_core::plan::GeneratedPlan;
use learnpath_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::plan::{LessonCounts, Plan};

/// Column list for plans queries.
const COLUMNS: &str = "id, user_id, plan_title, difficulty_level, total_duration_months, \
    status, progress, creation_date, last_updated";

/// Provides CRUD and tree operations for learning plans.
pub struct PlanRepo;

impl PlanRepo {
    /// Persist a generated plan tree for a user in one transaction.
    ///
    /// Inserts the plan row, then one module row per module, then one
    /// lesson row per lesson. The transient `Youtube_keywords` field of
    /// generated lessons is intentionally not persisted. Returns the
    /// new plan id.
    pub async fn save_tree(
        pool: &PgPool,
        user_id: DbId,
        plan: &GeneratedPlan,
        difficulty_level: &str,
        total_duration_months: i32,
    ) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (plan_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO plans (user_id, plan_title, difficulty_level, total_duration_months)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(user_id)
        .bind(&plan.plan_title)
        .bind(difficulty_level)
        .bind(total_duration_months)
        .fetch_one(&mut *tx)
        .await?;

        for module in &plan.modules {
            let (module_id,): (DbId,) = sqlx::query_as(
                "INSERT INTO modules (plan_id, module_number, module_title)
                 VALUES ($1, $2, $3)
                 RETURNING id",
            )
            .bind(plan_id)
            .bind(module.module_number)
            .bind(&module.module_title)
            .fetch_one(&mut *tx)
            .await?;

            for lesson in &module.lessons {
                sqlx::query(
                    "INSERT INTO lessons (module_id, day_of_plan, topic, description)
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(module_id)
                .bind(lesson.day_of_plan)
                .bind(&lesson.topic)
                .bind(&lesson.description)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(plan_id)
    }

    /// Find a plan by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Plan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plans WHERE id = $1");
        sqlx::query_as::<_, Plan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a plan only if it is owned by the given user.
    ///
    /// Not-found and not-owned are indistinguishable to callers.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Plan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plans WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Plan>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's plans, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Plan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM plans WHERE user_id = $1 ORDER BY creation_date DESC, id DESC"
        );
        sqlx::query_as::<_, Plan>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Number of plans a user owns.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM plans WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Every plan title across all users, for recommendations.
    pub async fn all_titles(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT plan_title FROM plans")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(t,)| t).collect())
    }

    /// Total and completed lesson tallies for a plan.
    pub async fn lesson_counts(pool: &PgPool, plan_id: DbId) -> Result<LessonCounts, sqlx::Error> {
        sqlx::query_as::<_, LessonCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE l.is_completed) AS completed
             FROM lessons l
             JOIN modules m ON m.id = l.module_id
             WHERE m.plan_id = $1",
        )
        .bind(plan_id)
        .fetch_one(pool)
        .await
    }

    /// Persist a recomputed progress percentage.
    pub async fn set_progress(
        pool: &PgPool,
        plan_id: DbId,
        progress: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE plans SET progress = $2, last_updated = NOW() WHERE id = $1")
            .bind(plan_id)
            .bind(progress)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a plan and all descendant data in one transaction.
    ///
    /// Returns `false` when the plan row did not exist. FK-safe order:
    /// notes, lessons, modules, then the plan itself.
    pub async fn delete_cascade(pool: &PgPool, plan_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::delete_tree_in_tx(&mut tx, plan_id).await?;
        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(plan_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every plan a user owns, with descendants, in one
    /// transaction. Returns the number of plans removed.
    pub async fn delete_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let plan_ids: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM plans WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&mut *tx)
            .await?;

        for (plan_id,) in &plan_ids {
            Self::delete_tree_in_tx(&mut tx, *plan_id).await?;
        }

        let result = sqlx::query("DELETE FROM plans WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Delete a plan's notes, lessons, and modules inside a caller-owned
    /// transaction, leaving the plan row in place.
    async fn delete_tree_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        plan_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM notes WHERE plan_id = $1")
            .bind(plan_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query(
            "DELETE FROM lessons
             WHERE module_id IN (SELECT id FROM modules WHERE plan_id = $1)",
        )
        .bind(plan_id)
        .execute(&mut **tx)
        .await?;
        sqlx::query("DELETE FROM modules WHERE plan_id = $1")
            .bind(plan_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Recompute and persist a plan's progress inside a caller-owned
    /// connection (used by the completion-toggle transaction).
    pub async fn recount_progress_on(
        conn: &mut PgConnection,
        plan_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        let counts: LessonCounts = sqlx::query_as(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE l.is_completed) AS completed
             FROM lessons l
             JOIN modules m ON m.id = l.module_id
             WHERE m.plan_id = $1",
        )
        .bind(plan_id)
        .fetch_one(&mut *conn)
        .await?;

        let progress =
            learnpath_core::progress::progress_percent(counts.completed, counts.total);

        sqlx::query("UPDATE plans SET progress = $2, last_updated = NOW() WHERE id = $1")
            .bind(plan_id)
            .bind(progress)
            .execute(&mut *conn)
            .await?;

        Ok(progress)
    }
}
