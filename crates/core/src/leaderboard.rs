//! Global quiz leaderboard ranking.

use serde::Serialize;

use crate::types::DbId;

/// How many users the leaderboard shows.
pub const LEADERBOARD_SIZE: usize = 5;

/// Display name used when a user record is missing or has no username.
pub const ANONYMOUS_NAME: &str = "Anonymous User";

/// Per-user score total as read from the attempts store.
#[derive(Debug, Clone)]
pub struct UserScoreTotal {
    pub user_id: DbId,
    /// `None` when the user record no longer exists.
    pub username: Option<String>,
    /// Sum of raw (not percentage) scores across all attempts.
    pub total_score: i64,
}

/// One ranked leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub score: i64,
}

/// Rank per-user score totals into the top-N leaderboard.
///
/// Highest total first; ties are broken by user id so the order is
/// stable across requests. Missing usernames fall back to
/// [`ANONYMOUS_NAME`].
pub fn build_leaderboard(mut totals: Vec<UserScoreTotal>) -> Vec<LeaderboardEntry> {
    totals.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then(a.user_id.cmp(&b.user_id))
    });

    totals
        .into_iter()
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(i, row)| LeaderboardEntry {
            rank: i + 1,
            name: row
                .username
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
            score: row.total_score,
        })
        .collect()
}
