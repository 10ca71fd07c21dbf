//! Handler for the home-screen dashboard summary.

use axum::extract::State;
use axum::Json;
use learnpath_db::models::plan::Plan;
use learnpath_db::repositories::PlanRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for `GET /dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Display name from the caller's token.
    pub name: String,
    pub plan_count: i64,
    /// Most recently created plan, if any.
    pub latest_plan: Option<Plan>,
}

/// GET /api/v1/dashboard
///
/// Summary data for the home screen: who is logged in, how many plans
/// they have, and their newest plan.
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    let plan_count = PlanRepo::count_by_user(&state.pool, user.user_id).await?;
    let latest_plan = PlanRepo::list_by_user(&state.pool, user.user_id)
        .await?
        .into_iter()
        .next();

    Ok(Json(DataResponse {
        data: DashboardResponse {
            name: user.name,
            plan_count,
            latest_plan,
        },
    }))
}
