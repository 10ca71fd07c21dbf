//! Plan-generation schema, prompt construction, and response parsing.
//!
//! The generation API returns free-form text that is *supposed* to be a
//! single JSON object matching [`GeneratedPlan`]. Models wrap the
//! payload in prose or markdown fences often enough that we never parse
//! the raw response directly: [`extract_first_json_object`] scans for
//! the first balanced `{...}` substring and only that slice is fed to
//! serde.

use serde::{Deserialize, Serialize};

/// Study days assumed per month of plan duration.
pub const LESSONS_PER_MONTH: u32 = 20;

/// Longest plan duration accepted, in months.
pub const MAX_TIMELINE_MONTHS: u32 = 120;

/// Number of quiz questions requested from the summary/quiz prompt.
pub const QUIZ_QUESTION_COUNT: u32 = 3;

/// A complete plan as returned by the generation API, before any part
/// of it is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub plan_title: String,
    pub modules: Vec<GeneratedModule>,
}

/// One module of a generated plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedModule {
    pub module_title: String,
    pub module_number: i32,
    pub lessons: Vec<GeneratedLesson>,
}

/// One day's lesson of a generated plan.
///
/// `Youtube_keywords` exists only to aid later video search; it is
/// accepted from the model but never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedLesson {
    pub day_of_plan: i32,
    pub topic: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "Youtube_keywords", default)]
    pub youtube_keywords: Option<String>,
}

/// Combined summary + quiz payload from the enrichment prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryAndQuiz {
    pub summary: String,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

/// One multiple-choice question of a generated quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// Why a generation response could not be turned into a plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanParseError {
    #[error("no JSON object found in the generation response")]
    NoJsonObject,

    #[error("generation response is not a valid plan: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl GeneratedPlan {
    /// Total number of lessons across all modules.
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }
}

/// Number of lessons a plan of the given duration is asked to contain.
/// Saturates rather than wrapping for out-of-range durations; callers
/// are expected to reject anything above [`MAX_TIMELINE_MONTHS`].
pub fn expected_lesson_count(timeline_months: u32) -> u32 {
    timeline_months.saturating_mul(LESSONS_PER_MONTH)
}

/// Whether a plan duration is within the accepted range.
pub fn timeline_in_range(timeline_months: i64) -> bool {
    (1..=MAX_TIMELINE_MONTHS as i64).contains(&timeline_months)
}

/// Build the plan-generation prompt.
///
/// Encodes the lesson budget (20 study days per month), the pacing
/// instruction, and a strict JSON-only output contract matching
/// [`GeneratedPlan`].
pub fn build_plan_prompt(topic: &str, difficulty: &str, timeline_months: u32) -> String {
    let total_lessons = expected_lesson_count(timeline_months);
    format!(
        r#"Generate a day-by-day learning plan for:
Topic: "{topic}" | Level: "{difficulty}" | Duration: {timeline_months} months

Constraints:
1. Total lessons = {total_lessons} (20 days/month).
2. Pace: Basic -> Advanced. No filler days.
3. Output JSON ONLY. No markdown.

Expected JSON Structure:
{{
  "plan_title": "string",
  "modules": [
    {{
      "module_title": "string",
      "module_number": 1,
      "lessons": [
        {{
          "day_of_plan": 1,
          "topic": "string",
          "description": "string",
          "Youtube_keywords": "string"
        }}
      ]
    }}
  ]
}}"#
    )
}

/// Build the combined summary + quiz prompt for a lesson.
///
/// One call produces both artifacts; the contract demands a raw JSON
/// object with `summary` and `quiz` keys matching [`SummaryAndQuiz`].
pub fn build_summary_quiz_prompt(topic: &str, description: &str) -> String {
    format!(
        r#"You are an expert instructor and content creator. Perform the following two tasks based on the provided lesson topic and description. Your response MUST be ONLY the raw JSON object, without any markdown formatting.

Lesson Topic: {topic}
Lesson Description: {description}

Task 1: Write a Summary
Generate a detailed, informative summary of the lesson topic. The summary should be at least 4-5 paragraphs long and cover the key concepts, definitions, and importance of the topic. Write it as a piece of educational text. DO NOT mention "this video" or "the lesson".

Task 2: Create a Quiz
Based on the summary you just generated, create a {QUIZ_QUESTION_COUNT}-question multiple-choice quiz. The questions should test conceptual understanding, not just be "fill-in-the-blank".

JSON Output Format:
Return a single JSON object with two keys: "summary" (a string) and "quiz" (a list of objects), like this:
{{"summary": "Your detailed summary here...", "quiz": [{{"question": "...", "options": ["...", "...", "..."], "answer": "..."}}]}}"#
    )
}

/// Extract the first balanced `{...}` substring from free-form text.
///
/// Tracks brace depth while skipping over string literals (including
/// escaped quotes), so braces inside JSON strings do not unbalance the
/// scan. Returns `None` when no complete object is present.
pub fn extract_first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a raw generation response into a [`GeneratedPlan`].
pub fn parse_generated_plan(raw: &str) -> Result<GeneratedPlan, PlanParseError> {
    let json = extract_first_json_object(raw).ok_or(PlanParseError::NoJsonObject)?;
    Ok(serde_json::from_str(json)?)
}

/// Parse a raw generation response into a [`SummaryAndQuiz`].
pub fn parse_summary_and_quiz(raw: &str) -> Result<SummaryAndQuiz, PlanParseError> {
    let json = extract_first_json_object(raw).ok_or(PlanParseError::NoJsonObject)?;
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_object() {
        let text = r#"{"a": 1}"#;
        assert_eq!(extract_first_json_object(text), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_extract_skips_surrounding_prose_and_fences() {
        let text = "Sure! Here is your plan:\n```json\n{\"plan_title\": \"Rust\"}\n```\nEnjoy.";
        assert_eq!(
            extract_first_json_object(text),
            Some(r#"{"plan_title": "Rust"}"#)
        );
    }

    #[test]
    fn test_extract_handles_nested_and_string_braces() {
        let text = r#"noise {"outer": {"inner": "has } brace and \" quote"}} trailing {"#;
        assert_eq!(
            extract_first_json_object(text),
            Some(r#"{"outer": {"inner": "has } brace and \" quote"}}"#)
        );
    }

    #[test]
    fn test_extract_unbalanced_returns_none() {
        assert_eq!(extract_first_json_object("no object here"), None);
        assert_eq!(extract_first_json_object(r#"{"open": true"#), None);
    }

    #[test]
    fn test_parse_generated_plan_roundtrip() {
        let raw = r#"
        The model says:
        {
          "plan_title": "SQL Mastery",
          "modules": [
            {
              "module_title": "Foundations",
              "module_number": 1,
              "lessons": [
                {"day_of_plan": 1, "topic": "SELECT basics", "description": "Rows and columns", "Youtube_keywords": "sql select tutorial"},
                {"day_of_plan": 2, "topic": "WHERE clauses", "description": "Filtering"}
              ]
            }
          ]
        }"#;

        let plan = parse_generated_plan(raw).expect("plan should parse");
        assert_eq!(plan.plan_title, "SQL Mastery");
        assert_eq!(plan.modules.len(), 1);
        assert_eq!(plan.lesson_count(), 2);
        assert_eq!(
            plan.modules[0].lessons[0].youtube_keywords.as_deref(),
            Some("sql select tutorial")
        );
        // Missing keywords and description default rather than failing.
        assert!(plan.modules[0].lessons[1].youtube_keywords.is_none());
    }

    #[test]
    fn test_parse_generated_plan_rejects_garbage() {
        assert!(matches!(
            parse_generated_plan("total nonsense"),
            Err(PlanParseError::NoJsonObject)
        ));
        assert!(matches!(
            parse_generated_plan(r#"{"plan_title": 42}"#),
            Err(PlanParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_summary_and_quiz() {
        let raw = r#"{"summary": "Long text.", "quiz": [{"question": "Q?", "options": ["a", "b", "c"], "answer": "a"}]}"#;
        let parsed = parse_summary_and_quiz(raw).expect("should parse");
        assert_eq!(parsed.summary, "Long text.");
        assert_eq!(parsed.quiz.len(), 1);
        assert_eq!(parsed.quiz[0].answer, "a");
    }

    #[test]
    fn test_plan_prompt_encodes_lesson_budget() {
        let prompt = build_plan_prompt("SQL", "beginner", 3);
        assert!(prompt.contains("Total lessons = 60"));
        assert!(prompt.contains("\"SQL\""));
        assert!(prompt.contains("Output JSON ONLY"));
    }

    #[test]
    fn test_expected_lesson_count() {
        assert_eq!(expected_lesson_count(1), 20);
        assert_eq!(expected_lesson_count(6), 120);
        // Out-of-range durations saturate instead of wrapping.
        assert_eq!(expected_lesson_count(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_timeline_range() {
        assert!(timeline_in_range(1));
        assert!(timeline_in_range(MAX_TIMELINE_MONTHS as i64));
        assert!(!timeline_in_range(0));
        assert!(!timeline_in_range(-3));
        assert!(!timeline_in_range(MAX_TIMELINE_MONTHS as i64 + 1));
    }
}
