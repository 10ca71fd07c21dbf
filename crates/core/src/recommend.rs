//! Plan recommendations by title frequency.

use std::collections::HashMap;

/// How many titles a recommendation list contains at most.
pub const RECOMMENDATION_LIMIT: usize = 5;

/// Most frequent plan titles in descending-frequency order.
///
/// Ties are broken by first appearance so the result is deterministic.
/// Empty or blank titles are skipped; an empty input yields an empty
/// list.
pub fn top_titles<I>(titles: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for title in titles {
        let title = title.trim().to_string();
        if title.is_empty() {
            continue;
        }
        let count = counts.entry(title.clone()).or_insert(0);
        if *count == 0 {
            order.push(title);
        }
        *count += 1;
    }

    let mut ranked: Vec<(usize, usize, String)> = order
        .into_iter()
        .enumerate()
        .map(|(first_seen, title)| (counts[&title], first_seen, title))
        .collect();
    // Highest count first; earlier first appearance wins ties.
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(_, _, title)| title)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_descending_frequency() {
        let result = top_titles(titles(&["Python", "Python", "Go"]), 5);
        assert_eq!(result, vec!["Python".to_string(), "Go".to_string()]);
    }

    #[test]
    fn test_limit_applies() {
        let result = top_titles(titles(&["a", "b", "c", "d", "e", "f"]), 5);
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let result = top_titles(titles(&["Rust", "Go", "Rust", "Go", "Zig"]), 5);
        assert_eq!(
            result,
            vec!["Rust".to_string(), "Go".to_string(), "Zig".to_string()]
        );
    }

    #[test]
    fn test_blank_titles_skipped_and_empty_input_ok() {
        assert!(top_titles(titles(&[]), 5).is_empty());
        assert_eq!(
            top_titles(titles(&["", "  ", "SQL"]), 5),
            vec!["SQL".to_string()]
        );
    }
}
