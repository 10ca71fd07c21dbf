//! Handler for deleting study notes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use learnpath_core::error::CoreError;
use learnpath_core::types::DbId;
use learnpath_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// DELETE /api/v1/notes/{id}
///
/// Delete one of the caller's notes. A note owned by someone else
/// reads as absent.
pub async fn delete_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(note_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = NoteRepo::delete_owned(&state.pool, note_id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "note",
            id: note_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
