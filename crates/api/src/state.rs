use std::sync::Arc;

use learnpath_core::video::RankingStrategy;
use learnpath_gemini::GeminiClient;
use learnpath_youtube::{TranscriptClient, YoutubeSearchClient};

use crate::config::ServerConfig;
use crate::ranking::{EmbeddingRanker, FirstResultRanker, VideoRanker};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: learnpath_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// LLM client; `None` when `GEMINI_API_KEY` is unset.
    pub gemini: Option<Arc<GeminiClient>>,
    /// Video search client; `None` when `YOUTUBE_API_KEY` is unset.
    pub youtube: Option<Arc<YoutubeSearchClient>>,
    /// Caption transcript client (no API key required).
    pub transcripts: Arc<TranscriptClient>,
    /// Strategy that picks the winning video from search candidates.
    pub ranker: Arc<dyn VideoRanker>,
}

impl AppState {
    /// Assemble state from configuration and a connected pool.
    ///
    /// The embedding ranker needs the LLM client; if it is configured
    /// without one we fall back to first-result rather than failing
    /// every video request at runtime.
    pub fn from_config(pool: learnpath_db::DbPool, config: ServerConfig) -> Self {
        let http = reqwest::Client::new();

        let gemini = config.gemini_api_key.clone().map(|key| {
            Arc::new(GeminiClient::with_client(
                http.clone(),
                key,
                config.gemini_model.clone(),
            ))
        });

        let youtube = config
            .youtube_api_key
            .clone()
            .map(|key| Arc::new(YoutubeSearchClient::with_client(http.clone(), key)));

        let transcripts = Arc::new(TranscriptClient::with_client(http));

        let ranker: Arc<dyn VideoRanker> = match (config.video_ranking, &gemini) {
            (RankingStrategy::EmbeddingSimilarity, Some(client)) => {
                Arc::new(EmbeddingRanker::new(Arc::clone(client)))
            }
            (RankingStrategy::EmbeddingSimilarity, None) => {
                tracing::warn!(
                    "VIDEO_RANKING=embedding-similarity requires GEMINI_API_KEY; \
                     falling back to first-result"
                );
                Arc::new(FirstResultRanker)
            }
            (RankingStrategy::FirstResult, _) => Arc::new(FirstResultRanker),
        };

        Self {
            pool,
            config: Arc::new(config),
            gemini,
            youtube,
            transcripts,
            ranker,
        }
    }
}
