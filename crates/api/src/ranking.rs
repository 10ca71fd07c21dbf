//! Pluggable strategies for picking the winning video for a lesson.

use std::sync::Arc;

use async_trait::async_trait;
use learnpath_core::similarity::most_similar;
use learnpath_core::video::VideoCandidate;
use learnpath_gemini::GeminiClient;

use crate::error::AppError;

/// Picks one video out of the search candidates for a lesson.
///
/// Implementations must not assume `candidates` is non-empty.
#[async_trait]
pub trait VideoRanker: Send + Sync {
    async fn pick(
        &self,
        lesson_text: &str,
        candidates: &[VideoCandidate],
    ) -> Result<Option<VideoCandidate>, AppError>;
}

/// Trusts the search API's relevance ordering and takes the first hit.
pub struct FirstResultRanker;

#[async_trait]
impl VideoRanker for FirstResultRanker {
    async fn pick(
        &self,
        _lesson_text: &str,
        candidates: &[VideoCandidate],
    ) -> Result<Option<VideoCandidate>, AppError> {
        Ok(candidates.first().cloned())
    }
}

/// Re-ranks candidates by embedding similarity between the lesson text
/// and each candidate's title + description.
pub struct EmbeddingRanker {
    gemini: Arc<GeminiClient>,
}

impl EmbeddingRanker {
    pub fn new(gemini: Arc<GeminiClient>) -> Self {
        Self { gemini }
    }
}

#[async_trait]
impl VideoRanker for EmbeddingRanker {
    async fn pick(
        &self,
        lesson_text: &str,
        candidates: &[VideoCandidate],
    ) -> Result<Option<VideoCandidate>, AppError> {
        if candidates.is_empty() {
            return Ok(None);
        }

        let lesson_embedding = self
            .gemini
            .embed(lesson_text)
            .await
            .map_err(|e| AppError::ExternalService(format!("lesson embedding failed: {e}")))?;

        let mut embeddings = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let embedding = self
                .gemini
                .embed(&candidate.ranking_text())
                .await
                .map_err(|e| {
                    AppError::ExternalService(format!("candidate embedding failed: {e}"))
                })?;
            embeddings.push(embedding);
        }

        let winner =
            most_similar(&lesson_embedding, &embeddings).map(|idx| candidates[idx].clone());
        Ok(winner)
    }
}
