//! Video search against the YouTube Data API v3.

use std::time::Duration;

use learnpath_core::video::VideoCandidate;
use serde::Deserialize;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Candidate videos fetched per lesson.
const MAX_RESULTS: u32 = 5;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for video search.
pub struct YoutubeSearchClient {
    client: reqwest::Client,
    api_key: String,
}

/// Errors from the search layer.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("YouTube API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

impl YoutubeSearchClient {
    /// Create a new search client with the given Data API key.
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Search for up to five videos matching the query. Items without
    /// a video id (channels, playlists) are skipped.
    pub async fn search(&self, query: &str) -> Result<Vec<VideoCandidate>, SearchError> {
        let response = self
            .client
            .get(SEARCH_URL)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", &MAX_RESULTS.to_string()),
                ("key", &self.api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SearchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed
            .items
            .into_iter()
            .filter_map(|item| {
                item.id.video_id.map(|video_id| VideoCandidate {
                    video_id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_skips_non_video_items() {
        let raw = serde_json::json!({
            "items": [
                { "id": { "videoId": "abc123" },
                  "snippet": { "title": "Rust intro", "description": "Basics" } },
                { "id": { "channelId": "chan" },
                  "snippet": { "title": "A channel", "description": "" } }
            ]
        });
        let parsed: SearchResponse = serde_json::from_value(raw).unwrap();
        let candidates: Vec<_> = parsed
            .items
            .into_iter()
            .filter_map(|i| i.id.video_id)
            .collect();
        assert_eq!(candidates, vec!["abc123"]);
    }
}
