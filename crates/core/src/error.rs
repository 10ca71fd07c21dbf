use crate::types::DbId;

/// Domain-level error taxonomy shared across crates.
///
/// `NotFound` deliberately covers both "does not exist" and "exists but
/// is owned by someone else" for plan- and lesson-scoped resources, so
/// responses never leak whether another user's resource exists.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
