//! Caption transcript retrieval via the timedtext endpoint.
//!
//! Videos without captions (or with captions disabled by the owner)
//! return an empty body, which surfaces as
//! [`TranscriptError::NotAvailable`] so callers can distinguish
//! "no transcript" from a downstream failure.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const TIMEDTEXT_URL: &str = "https://video.google.com/timedtext";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One caption cue, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Seconds from the start of the video.
    pub start: f64,
    /// Seconds the cue stays on screen.
    pub duration: f64,
}

/// Errors from the transcript layer.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The video has no retrievable captions.
    #[error("no transcript available for video {video_id}")]
    NotAvailable { video_id: String },

    /// The endpoint returned a body we could not parse.
    #[error("malformed transcript payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

// json3 wire format: events carry millisecond offsets and utf8 segments.

#[derive(Debug, Deserialize)]
struct TimedTextResponse {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

/// HTTP client for caption transcripts.
pub struct TranscriptClient {
    client: reqwest::Client,
}

impl Default for TranscriptClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch the English transcript for a video as ordered segments.
    pub async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        let response = self
            .client
            .get(TIMEDTEXT_URL)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("v", video_id), ("lang", "en"), ("fmt", "json3")])
            .send()
            .await?;

        // The endpoint answers 200 with an empty body (or 404) when no
        // caption track exists.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(TranscriptError::NotAvailable {
                video_id: video_id.to_string(),
            });
        }
        let response = response.error_for_status()?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(TranscriptError::NotAvailable {
                video_id: video_id.to_string(),
            });
        }

        let segments = parse_json3(&body)?;
        if segments.is_empty() {
            return Err(TranscriptError::NotAvailable {
                video_id: video_id.to_string(),
            });
        }
        Ok(segments)
    }
}

/// Flatten a json3 payload into cues, dropping events with no text
/// (styling and window events).
fn parse_json3(body: &str) -> Result<Vec<TranscriptSegment>, serde_json::Error> {
    let parsed: TimedTextResponse = serde_json::from_str(body)?;
    Ok(parsed
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = text.trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                text,
                start: event.start_ms as f64 / 1000.0,
                duration: event.duration_ms as f64 / 1000.0,
            })
        })
        .collect())
}

/// Join segments into one readable block, newline-separated.
pub fn join_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
