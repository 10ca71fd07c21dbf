//! YouTube HTTP client library.
//!
//! Wraps the Data API v3 search endpoint (candidate videos for a
//! lesson) and the timedtext endpoint (caption transcripts) using
//! [`reqwest`].

pub mod search;
pub mod transcript;

pub use search::{SearchError, YoutubeSearchClient};
pub use transcript::{TranscriptClient, TranscriptError, TranscriptSegment};
