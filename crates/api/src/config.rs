use learnpath_core::video::RankingStrategy;

use crate::auth::jwt::JwtConfig;

/// Default model used for plan generation and summary/quiz enrichment.
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables. The external API
/// keys are optional: a missing key disables the dependent feature
/// instead of preventing startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Google API key for plan generation and enrichment; `None`
    /// disables those endpoints.
    pub gemini_api_key: Option<String>,
    /// Generation model id.
    pub gemini_model: String,
    /// YouTube Data API key; `None` disables video lookup.
    pub youtube_api_key: Option<String>,
    /// How the winning video is picked from search candidates.
    pub video_ranking: RankingStrategy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `GEMINI_API_KEY`       | unset (feature disabled)   |
    /// | `GEMINI_MODEL`         | `gemini-2.5-flash`         |
    /// | `YOUTUBE_API_KEY`      | unset (feature disabled)   |
    /// | `VIDEO_RANKING`        | `first-result`             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into());
        let youtube_api_key = std::env::var("YOUTUBE_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let video_ranking = match std::env::var("VIDEO_RANKING") {
            Ok(value) => RankingStrategy::parse(&value)
                .unwrap_or_else(|e| panic!("Invalid VIDEO_RANKING: {e}")),
            Err(_) => RankingStrategy::default(),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            gemini_api_key,
            gemini_model,
            youtube_api_key,
            video_ranking,
        }
    }
}
