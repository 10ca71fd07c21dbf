//! Video candidate types and ranking strategy selection.

use serde::Serialize;

/// One search result from the video-search collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct VideoCandidate {
    pub video_id: String,
    pub title: String,
    pub description: String,
}

impl VideoCandidate {
    /// Embeddable watch URL stored on the lesson.
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.video_id)
    }

    /// Title + description text used for similarity ranking.
    pub fn ranking_text(&self) -> String {
        format!("{}: {}", self.title, self.description)
    }
}

/// Which ranking strategy picks the video for a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingStrategy {
    /// Take the search API's first result.
    #[default]
    FirstResult,
    /// Re-rank candidates by embedding similarity to the lesson text.
    EmbeddingSimilarity,
}

impl RankingStrategy {
    /// Parse a configuration value; unrecognized values are rejected so
    /// misconfiguration fails fast at startup.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "first-result" => Ok(Self::FirstResult),
            "embedding-similarity" => Ok(Self::EmbeddingSimilarity),
            other => Err(format!(
                "unknown video ranking strategy '{other}' (expected 'first-result' or 'embedding-similarity')"
            )),
        }
    }
}

/// Search text for a lesson topic, matching what users would type.
pub fn video_search_query(topic: &str) -> String {
    format!("{topic} tutorial")
}

/// Lesson text compared against candidates when ranking by similarity.
pub fn lesson_ranking_text(topic: &str, description: &str) -> String {
    format!("{topic}: {description}")
}

/// Video id of a stored embed link, if the link has the expected shape.
pub fn embed_video_id(url: &str) -> Option<&str> {
    let id = url.split("/embed/").nth(1)?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!(
            RankingStrategy::parse("first-result").unwrap(),
            RankingStrategy::FirstResult
        );
        assert_eq!(
            RankingStrategy::parse("embedding-similarity").unwrap(),
            RankingStrategy::EmbeddingSimilarity
        );
        assert!(RankingStrategy::parse("best-effort").is_err());
    }

    #[test]
    fn test_embed_url_and_id_roundtrip() {
        let candidate = VideoCandidate {
            video_id: "abc123".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
        };
        let url = candidate.embed_url();
        assert_eq!(url, "https://www.youtube.com/embed/abc123");
        assert_eq!(embed_video_id(&url), Some("abc123"));
    }

    #[test]
    fn test_embed_video_id_rejects_other_links() {
        assert_eq!(embed_video_id("https://youtu.be/abc123"), None);
        assert_eq!(embed_video_id("https://www.youtube.com/embed/"), None);
    }

    #[test]
    fn test_search_query_shape() {
        assert_eq!(video_search_query("Joins in SQL"), "Joins in SQL tutorial");
    }
}
