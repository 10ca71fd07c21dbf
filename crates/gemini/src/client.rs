//! REST API client for the Gemini generative-language endpoints.

use std::time::Duration;

use serde::Deserialize;

/// Base URL of the generative-language API.
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Per-request timeout. Plan generation is the slowest call we make
/// and usually completes well under this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Transient failures (network errors, 429, 5xx) are retried this many
/// times with a short linear backoff.
const RETRY_BUDGET: u32 = 2;

const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Embedding model used for video ranking.
const EMBEDDING_MODEL: &str = "gemini-embedding-001";

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

/// Errors from the Gemini REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response carried no usable content (empty candidates,
    /// safety-blocked output, missing embedding values).
    #[error("Gemini response contained no content")]
    EmptyResponse,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// * `api_key` - Google API key with generative-language access.
    /// * `model` - Generation model id, e.g. `gemini-2.5-flash`.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for connection pooling across services).
    pub fn with_client(client: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }

    /// Generate text from a single prompt, returning the first
    /// candidate's concatenated text parts.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{API_BASE}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response: GenerateResponse = self.post_with_retry(&url, &body).await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GeminiError::EmptyResponse);
        }
        Ok(text)
    }

    /// Embed a piece of text into a dense vector.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, GeminiError> {
        let url = format!(
            "{API_BASE}/models/{EMBEDDING_MODEL}:embedContent?key={}",
            self.api_key
        );
        let body = serde_json::json!({
            "content": { "parts": [{ "text": text }] },
        });

        let response: EmbedResponse = self.post_with_retry(&url, &body).await?;

        match response.embedding {
            Some(e) if !e.values.is_empty() => Ok(e.values),
            _ => Err(GeminiError::EmptyResponse),
        }
    }

    // ---- private helpers ----

    /// POST a JSON body, retrying transient failures within the budget.
    async fn post_with_retry<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, GeminiError> {
        let mut attempt = 0;
        loop {
            match self.post_once(url, body).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < RETRY_BUDGET && is_transient(&err) => {
                    attempt += 1;
                    tracing::warn!(attempt, error = %err, "retrying Gemini request");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn post_once<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, GeminiError> {
        let response = self
            .client
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Whether an error is worth retrying: connection-level failures,
/// rate limiting, and server-side errors.
fn is_transient(err: &GeminiError) -> bool {
    match err {
        GeminiError::Request(e) => e.is_timeout() || e.is_connect(),
        GeminiError::Api { status, .. } => *status == 429 || *status >= 500,
        GeminiError::EmptyResponse => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(is_transient(&GeminiError::Api {
            status: 429,
            body: String::new()
        }));
        assert!(is_transient(&GeminiError::Api {
            status: 503,
            body: String::new()
        }));
        assert!(!is_transient(&GeminiError::Api {
            status: 400,
            body: String::new()
        }));
        assert!(!is_transient(&GeminiError::EmptyResponse));
    }

    #[test]
    fn generate_response_parses_candidates() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hello " }, { "text": "world" }] }
            }]
        });
        let parsed: GenerateResponse = serde_json::from_value(raw).unwrap();
        let text: String = parsed.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .iter()
            .filter_map(|p| p.text.clone())
            .collect();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn embed_response_parses_values() {
        let raw = serde_json::json!({ "embedding": { "values": [0.1, 0.2] } });
        let parsed: EmbedResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.embedding.unwrap().values.len(), 2);
    }
}
