//! Plan module model.

use learnpath_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `modules` table. Immutable after creation; deleted
/// only with its parent plan.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Module {
    pub id: DbId,
    pub plan_id: DbId,
    pub module_number: i32,
    pub module_title: String,
}
