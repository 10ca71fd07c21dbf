//! Integration tests for quiz attempts, the overview aggregates, and
//! the leaderboard.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, get_auth, lesson_ids, post_json_auth, register_and_login, save_plan,
};

async fn record(pool: &PgPool, token: &str, lesson_id: i64, plan_id: i64, score: i32, total: i32) {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/lessons/{lesson_id}/quiz-attempts"),
        token,
        json!({ "score": score, "total": total, "plan_id": plan_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_record_attempt_validation(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;
    let plan_id = save_plan(&pool, &token, "Learn Rust").await;
    let lessons = lesson_ids(&pool, &token, plan_id).await;
    let uri = format!("/api/v1/lessons/{}/quiz-attempts", lessons[0]);

    // Missing score.
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        &token,
        json!({ "total": 3, "plan_id": plan_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Score above total.
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        &token,
        json!({ "score": 4, "total": 3, "plan_id": plan_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Negative score.
    let response = post_json_auth(
        build_test_app(pool),
        &uri,
        &token,
        json!({ "score": -1, "total": 3, "plan_id": plan_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_record_attempt_requires_owned_lesson(pool: PgPool) {
    let ada = register_and_login(&pool, "ada").await;
    let grace = register_and_login(&pool, "grace").await;
    let plan_id = save_plan(&pool, &ada, "Ada's Plan").await;
    let lessons = lesson_ids(&pool, &ada, plan_id).await;

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/lessons/{}/quiz-attempts", lessons[0]),
        &grace,
        json!({ "score": 2, "total": 3, "plan_id": plan_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_overview_aggregates_own_attempts(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;
    let plan_id = save_plan(&pool, &token, "Learn Rust").await;
    let lessons = lesson_ids(&pool, &token, plan_id).await;

    record(&pool, &token, lessons[0], plan_id, 1, 4).await; // 25%
    record(&pool, &token, lessons[1], plan_id, 3, 4).await; // 75%

    let response = get_auth(build_test_app(pool), "/api/v1/quizzes", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = &body["data"];

    let attempts = data["attempts"].as_array().unwrap();
    assert_eq!(attempts.len(), 2);
    // Newest first.
    assert_eq!(attempts[0]["percent"], 75);
    assert_eq!(attempts[0]["topic"], "Deep Dive");
    assert_eq!(attempts[1]["percent"], 25);

    assert_eq!(data["stats"]["total_taken"], 2);
    assert_eq!(data["stats"]["average_score"], 50);
    assert_eq!(data["stats"]["highest_score"], 75);
    assert_eq!(data["last_topic"], "Deep Dive");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_overview_empty_history(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;

    let response = get_auth(build_test_app(pool), "/api/v1/quizzes", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = &body["data"];

    assert_eq!(data["attempts"].as_array().unwrap().len(), 0);
    assert_eq!(data["stats"]["total_taken"], 0);
    assert!(data["last_topic"].is_null());
    assert_eq!(data["leaderboard"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_leaderboard_ranks_raw_score_sums(pool: PgPool) {
    let ada = register_and_login(&pool, "ada").await;
    let grace = register_and_login(&pool, "grace").await;

    let ada_plan = save_plan(&pool, &ada, "Ada's Plan").await;
    let grace_plan = save_plan(&pool, &grace, "Grace's Plan").await;
    let ada_lessons = lesson_ids(&pool, &ada, ada_plan).await;
    let grace_lessons = lesson_ids(&pool, &grace, grace_plan).await;

    // Ada totals 3, Grace totals 5.
    record(&pool, &ada, ada_lessons[0], ada_plan, 1, 4).await;
    record(&pool, &ada, ada_lessons[1], ada_plan, 2, 4).await;
    record(&pool, &grace, grace_lessons[0], grace_plan, 5, 5).await;

    let response = get_auth(build_test_app(pool), "/api/v1/quizzes", &ada).await;
    let body = body_json(response).await;
    let leaderboard = body["data"]["leaderboard"].as_array().unwrap();

    assert_eq!(leaderboard.len(), 2);
    assert_eq!(leaderboard[0]["rank"], 1);
    assert_eq!(leaderboard[0]["name"], "grace");
    assert_eq!(leaderboard[0]["score"], 5);
    assert_eq!(leaderboard[1]["rank"], 2);
    assert_eq!(leaderboard[1]["name"], "ada");
    assert_eq!(leaderboard[1]["score"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_attempts_survive_plan_deletion(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;
    let plan_id = save_plan(&pool, &token, "Learn Rust").await;
    let lessons = lesson_ids(&pool, &token, plan_id).await;
    record(&pool, &token, lessons[0], plan_id, 2, 3).await;

    let response = common::delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{plan_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // History remains, with the topic replaced by a placeholder.
    let response = get_auth(build_test_app(pool), "/api/v1/quizzes", &token).await;
    let body = body_json(response).await;
    let attempts = body["data"]["attempts"].as_array().unwrap();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0]["topic"], "Unknown Topic");
}
