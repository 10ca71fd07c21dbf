//! Repository for the `modules` table.

use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::module::Module;

const COLUMNS: &str = "id, plan_id, module_number, module_title";

/// Read operations for plan modules. Modules are created and deleted
/// only through [`super::PlanRepo`]'s tree operations.
pub struct ModuleRepo;

impl ModuleRepo {
    /// List a plan's modules in module-number order.
    pub async fn list_by_plan(pool: &PgPool, plan_id: DbId) -> Result<Vec<Module>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules WHERE plan_id = $1 ORDER BY module_number"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(plan_id)
            .fetch_all(pool)
            .await
    }
}
