//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-row invariants
//! (plan-tree saves, cascading deletes, progress recomputes) run inside
//! a transaction owned by the repository so partial writes cannot leave
//! orphans or a stale progress cache.

pub mod lesson_repo;
pub mod module_repo;
pub mod note_repo;
pub mod plan_repo;
pub mod quiz_attempt_repo;
pub mod session_repo;
pub mod user_repo;

pub use lesson_repo::LessonRepo;
pub use module_repo::ModuleRepo;
pub use note_repo::NoteRepo;
pub use plan_repo::PlanRepo;
pub use quiz_attempt_repo::QuizAttemptRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
