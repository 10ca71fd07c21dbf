pub mod lesson;
pub mod module;
pub mod note;
pub mod plan;
pub mod quiz_attempt;
pub mod session;
pub mod user;
