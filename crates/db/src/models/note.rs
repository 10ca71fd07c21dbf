//! Study note model.

use learnpath_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notes` table. Notes are created and deleted, never
/// updated in place.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub user_id: DbId,
    pub plan_id: DbId,
    pub lesson_id: DbId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
}

/// A note joined with its lesson's topic for course-detail display.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NoteWithTopic {
    pub id: DbId,
    pub user_id: DbId,
    pub plan_id: DbId,
    pub lesson_id: DbId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub topic: Option<String>,
}

/// DTO for creating a note.
#[derive(Debug)]
pub struct CreateNote {
    pub user_id: DbId,
    pub plan_id: DbId,
    pub lesson_id: DbId,
    pub title: String,
    pub body: String,
}
