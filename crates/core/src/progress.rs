//! Plan progress arithmetic.

/// Completion percentage for a plan, rounded to the nearest integer.
///
/// A plan with no lessons has a progress of 0, never a division error.
pub fn progress_percent(completed: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan_is_zero() {
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn test_half_complete_rounds_to_fifty() {
        assert_eq!(progress_percent(10, 20), 50);
    }

    #[test]
    fn test_rounding_to_nearest() {
        // 1/3 = 33.33 -> 33, 2/3 = 66.67 -> 67
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
    }

    #[test]
    fn test_fully_complete() {
        assert_eq!(progress_percent(20, 20), 100);
    }
}
