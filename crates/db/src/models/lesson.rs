//! Lesson model.

use learnpath_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `lessons` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Lesson {
    pub id: DbId,
    pub module_id: DbId,
    pub day_of_plan: i32,
    pub topic: String,
    pub description: String,
    /// Lazily populated by video enrichment.
    pub youtube_link: Option<String>,
    pub is_completed: bool,
    /// Free-text workflow label (e.g. "Not Started", "In Progress").
    pub status: String,
    pub last_updated: Timestamp,
}
