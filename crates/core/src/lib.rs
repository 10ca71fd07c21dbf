//! Domain logic for the learnpath backend.
//!
//! Pure, I/O-free building blocks shared by the database and API crates:
//! error taxonomy, plan-generation schema and prompt construction,
//! progress arithmetic, recommendation/leaderboard aggregation, and the
//! similarity math behind the embedding video ranker.

pub mod error;
pub mod leaderboard;
pub mod plan;
pub mod progress;
pub mod quiz;
pub mod recommend;
pub mod similarity;
pub mod types;
pub mod video;
