//! HTTP handlers, one module per resource.

pub mod account;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod enrichment;
pub mod lessons;
pub mod notes;
pub mod plans;
pub mod quizzes;
