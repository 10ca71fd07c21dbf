//! Learning plan model.

use learnpath_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `plans` table. `progress` is a derived cache of the
/// completion percentage across the plan's lessons.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Plan {
    pub id: DbId,
    pub user_id: DbId,
    pub plan_title: String,
    pub difficulty_level: String,
    pub total_duration_months: i32,
    pub status: String,
    pub progress: i32,
    pub creation_date: Timestamp,
    pub last_updated: Timestamp,
}

/// Lesson tally for a plan, used to recompute `progress`.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct LessonCounts {
    pub total: i64,
    pub completed: i64,
}
