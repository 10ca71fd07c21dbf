//! Quiz attempt scoring and per-user aggregates.

use serde::Serialize;

/// Percentage score of a single attempt, rounded to the nearest integer.
///
/// A zero (or nonsensical) total is treated as a 0% attempt rather than
/// a division error; append-only history can contain anything clients
/// once sent.
pub fn attempt_percent(score: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    ((score as f64 / total as f64) * 100.0).round() as i32
}

/// Aggregated statistics over a user's quiz history.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuizStats {
    pub total_taken: usize,
    /// Mean of per-attempt percentages, rounded.
    pub average_score: i32,
    /// Best per-attempt percentage.
    pub highest_score: i32,
}

/// Summarize per-attempt percentages into [`QuizStats`].
pub fn summarize_attempts(percents: &[i32]) -> QuizStats {
    let total_taken = percents.len();
    if total_taken == 0 {
        return QuizStats {
            total_taken: 0,
            average_score: 0,
            highest_score: 0,
        };
    }
    let sum: i64 = percents.iter().map(|&p| p as i64).sum();
    QuizStats {
        total_taken,
        average_score: ((sum as f64 / total_taken as f64).round()) as i32,
        highest_score: *percents.iter().max().expect("non-empty"),
    }
}
