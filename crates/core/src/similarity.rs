//! Vector similarity for the embedding video ranker.

/// Cosine similarity between two embedding vectors.
///
/// Returns 0.0 for mismatched lengths or zero-magnitude inputs, which
/// ranks such candidates last instead of propagating NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Index of the candidate embedding most similar to the query.
///
/// `None` when there are no candidates.
pub fn most_similar(query: &[f32], candidates: &[Vec<f32>]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (i, cosine_similarity(query, c)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = vec![0.5, 0.5, 0.1];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_most_similar_picks_best_candidate() {
        let query = vec![1.0, 0.0];
        let candidates = vec![vec![0.0, 1.0], vec![0.9, 0.1], vec![-1.0, 0.0]];
        assert_eq!(most_similar(&query, &candidates), Some(1));
    }

    #[test]
    fn test_most_similar_empty() {
        assert_eq!(most_similar(&[1.0], &[]), None);
    }
}
