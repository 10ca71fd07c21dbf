//! Integration tests for course detail, progress recounting, and
//! cascade deletion.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, delete_auth, get_auth, lesson_ids, post_json_auth,
    register_and_login, save_plan,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn test_course_details_shape(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;
    let plan_id = save_plan(&pool, &token, "Learn Rust").await;

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/courses/{plan_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = &body["data"];

    assert_eq!(data["plan_title"], "Learn Rust");
    assert_eq!(data["progress"], 0);
    let modules = data["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0]["module_title"], "Module One");
    let lessons = modules[0]["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0]["topic"], "Intro");
    assert_eq!(lessons[0]["status"], "Not Started");
    assert_eq!(data["notes"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_updates_progress(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;
    let plan_id = save_plan(&pool, &token, "Learn Rust").await;
    let lessons = lesson_ids(&pool, &token, plan_id).await;

    // One of two lessons complete: 50 percent.
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/lessons/{}/completion", lessons[0]),
        &token,
        json!({ "is_completed": true, "plan_id": plan_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["is_completed"], true);
    assert_eq!(body["data"]["progress"], 50);

    // Course detail reflects the recount.
    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{plan_id}"),
        &token,
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["progress"], 50);

    // Un-completing drops it back to zero.
    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/lessons/{}/completion", lessons[0]),
        &token,
        json!({ "is_completed": false, "plan_id": plan_id }),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["progress"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_requires_matching_plan(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;
    let plan_id = save_plan(&pool, &token, "Learn Rust").await;
    let other_plan = save_plan(&pool, &token, "Learn Go").await;
    let lessons = lesson_ids(&pool, &token, plan_id).await;

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/lessons/{}/completion", lessons[0]),
        &token,
        json!({ "is_completed": true, "plan_id": other_plan }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_other_users_course_reads_as_absent(pool: PgPool) {
    let ada = register_and_login(&pool, "ada").await;
    let grace = register_and_login(&pool, "grace").await;
    let plan_id = save_plan(&pool, &ada, "Ada's Plan").await;

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{plan_id}"),
        &grace,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Same for deletes and for the lessons underneath.
    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{plan_id}"),
        &grace,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let lessons = lesson_ids(&pool, &ada, plan_id).await;
    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/lessons/{}", lessons[0]),
        &grace,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_course_cascades(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;
    let plan_id = save_plan(&pool, &token, "Learn Rust").await;
    let lessons = lesson_ids(&pool, &token, plan_id).await;

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{plan_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Plan and its lessons are gone.
    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{plan_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/lessons/{}", lessons[0]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again is a 404, not an error.
    let response = delete_auth(
        build_test_app(pool),
        &format!("/api/v1/courses/{plan_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lesson_status_update(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;
    let plan_id = save_plan(&pool, &token, "Learn Rust").await;
    let lessons = lesson_ids(&pool, &token, plan_id).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/lessons/{}/status", lessons[0]),
        &token,
        json!({ "status": "In Progress" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "In Progress");

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/lessons/{}/status", lessons[0]),
        &token,
        json!({ "status": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
