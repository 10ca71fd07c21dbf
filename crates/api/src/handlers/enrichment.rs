//! Best-effort lesson enrichment: video lookup, caption transcripts,
//! and generated summary + quiz content.

use axum::extract::{Path, State};
use axum::Json;
use learnpath_core::error::CoreError;
use learnpath_core::plan::{build_summary_quiz_prompt, parse_summary_and_quiz, SummaryAndQuiz};
use learnpath_core::types::DbId;
use learnpath_core::video::{embed_video_id, lesson_ranking_text, video_search_query};
use learnpath_db::repositories::LessonRepo;
use learnpath_youtube::{TranscriptError, TranscriptSegment};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::lessons::find_owned_lesson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response for `POST /lessons/{id}/video`.
#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub video_url: String,
    /// Whether the link was already stored on the lesson.
    pub from_cache: bool,
}

/// Response for `POST /lessons/{id}/transcript`.
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    /// All cue text joined with newlines.
    pub transcript: String,
    pub segments: Vec<TranscriptSegment>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/lessons/{id}/video
///
/// Resolve a video for the lesson. A previously stored link is
/// returned as-is; otherwise the search collaborator supplies up to
/// five candidates and the configured ranking strategy picks the
/// winner, which is persisted via a field-scoped update.
pub async fn resolve_video(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lesson_id): Path<DbId>,
) -> AppResult<Json<DataResponse<VideoResponse>>> {
    let lesson = find_owned_lesson(&state, lesson_id, user.user_id).await?;

    if let Some(link) = lesson.youtube_link.as_deref().filter(|l| !l.is_empty()) {
        return Ok(Json(DataResponse {
            data: VideoResponse {
                video_url: link.to_string(),
                from_cache: true,
            },
        }));
    }

    // No key, no candidates, or no winner all read the same to the
    // client: there is no video for this lesson right now.
    let no_video = AppError::Core(CoreError::NotFound {
        entity: "video",
        id: lesson_id,
    });

    let Some(youtube) = state.youtube.as_ref() else {
        tracing::warn!(lesson_id, "video lookup requested but YOUTUBE_API_KEY is unset");
        return Err(no_video);
    };

    let candidates = youtube
        .search(&video_search_query(&lesson.topic))
        .await
        .map_err(|e| AppError::ExternalService(format!("video search failed: {e}")))?;
    if candidates.is_empty() {
        return Err(no_video);
    }

    let lesson_text = lesson_ranking_text(&lesson.topic, &lesson.description);
    let winner = state
        .ranker
        .pick(&lesson_text, &candidates)
        .await?
        .ok_or(no_video)?;

    let video_url = winner.embed_url();
    LessonRepo::set_youtube_link(&state.pool, lesson_id, &video_url).await?;

    tracing::info!(lesson_id, video_id = %winner.video_id, "Resolved lesson video");
    Ok(Json(DataResponse {
        data: VideoResponse {
            video_url,
            from_cache: false,
        },
    }))
}

/// POST /api/v1/lessons/{id}/transcript
///
/// Fetch the caption transcript of the lesson's stored video.
/// Missing captions are a 404 distinct from downstream failures.
pub async fn fetch_transcript(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lesson_id): Path<DbId>,
) -> AppResult<Json<DataResponse<TranscriptResponse>>> {
    let lesson = find_owned_lesson(&state, lesson_id, user.user_id).await?;

    let link = lesson
        .youtube_link
        .as_deref()
        .filter(|l| !l.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest("This lesson has no video to fetch a transcript for".into())
        })?;
    let video_id = embed_video_id(link)
        .ok_or_else(|| AppError::BadRequest("The stored video link is not an embed URL".into()))?;

    let segments = state
        .transcripts
        .fetch(video_id)
        .await
        .map_err(|e| match e {
            TranscriptError::NotAvailable { .. } => AppError::TranscriptUnavailable(
                "No transcript is available for this video. The owner may have disabled captions."
                    .into(),
            ),
            other => AppError::ExternalService(format!("transcript fetch failed: {other}")),
        })?;

    let transcript = learnpath_youtube::transcript::join_segments(&segments);
    Ok(Json(DataResponse {
        data: TranscriptResponse {
            transcript,
            segments,
        },
    }))
}

/// POST /api/v1/lessons/{id}/summary-quiz
///
/// Generate a multi-paragraph summary plus a three-question quiz in a
/// single LLM call. Enrichment is best-effort: every failure mode
/// (missing key, API error, unparsable output) still answers 200 with
/// a placeholder summary and an empty quiz.
pub async fn summary_quiz(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lesson_id): Path<DbId>,
) -> AppResult<Json<DataResponse<SummaryAndQuiz>>> {
    let lesson = find_owned_lesson(&state, lesson_id, user.user_id).await?;

    if lesson.topic.trim().is_empty() {
        return Err(AppError::BadRequest("Lesson topic is missing".into()));
    }

    let content = match &state.gemini {
        None => placeholder("Content generation is disabled by the administrator."),
        Some(gemini) => {
            let prompt = build_summary_quiz_prompt(&lesson.topic, &lesson.description);
            match gemini.generate_text(&prompt).await {
                Err(e) => {
                    tracing::warn!(lesson_id, error = %e, "summary generation failed");
                    placeholder("An error occurred while generating content.")
                }
                Ok(raw) => match parse_summary_and_quiz(&raw) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        tracing::warn!(lesson_id, error = %e, "summary output unparsable");
                        placeholder("Failed to generate content in the correct format.")
                    }
                },
            }
        }
    };

    Ok(Json(DataResponse { data: content }))
}

fn placeholder(summary: &str) -> SummaryAndQuiz {
    SummaryAndQuiz {
        summary: summary.to_string(),
        quiz: Vec::new(),
    }
}
