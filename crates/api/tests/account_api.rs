//! Integration tests for profile settings, account lifecycle, and the
//! dashboard summary.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, delete_auth, get_auth, lesson_ids, login, post_json,
    post_json_auth, put_json_auth, register_and_login, save_plan, TEST_PASSWORD,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_profile_hides_password_hash(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;

    let response = get_auth(build_test_app(pool), "/api/v1/account/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "ada");
    assert_eq!(body["data"]["email"], "ada@test.com");
    assert!(body["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_profile_partial(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/account/profile",
        &token,
        json!({ "first_name": "Augusta" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["first_name"], "Augusta");
    // Untouched fields keep their stored values.
    assert_eq!(body["data"]["last_name"], "User");
    assert_eq!(body["data"]["username"], "ada");

    let response = put_json_auth(
        build_test_app(pool),
        "/api/v1/account/profile",
        &token,
        json!({ "username": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_profile_username_conflict(pool: PgPool) {
    register_and_login(&pool, "grace").await;
    let token = register_and_login(&pool, "ada").await;

    let response = put_json_auth(
        build_test_app(pool),
        "/api/v1/account/profile",
        &token,
        json!({ "username": "grace" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;

    // Wrong current password is forbidden, not unauthorized.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/account/password",
        &token,
        json!({ "current_password": "wrong", "new_password": "brand_new_password_1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/account/password",
        &token,
        json!({ "current_password": TEST_PASSWORD, "new_password": "brand_new_password_1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password no longer works, new one does.
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({
            "login_type": "username",
            "login_value": "ada",
            "password": TEST_PASSWORD,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/login",
        json!({
            "login_type": "username",
            "login_value": "ada",
            "password": "brand_new_password_1",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_all_plans_keeps_account(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;
    save_plan(&pool, &token, "Learn Rust").await;
    save_plan(&pool, &token, "Learn Go").await;

    let response = delete_auth(build_test_app(pool.clone()), "/api/v1/account/plans", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/courses", &token).await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // Account still logs in.
    login(&pool, "ada").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_account(pool: PgPool) {
    let ada = register_and_login(&pool, "ada").await;
    let grace = register_and_login(&pool, "grace").await;

    // Ada leaves quiz history behind before deleting her account.
    let plan_id = save_plan(&pool, &ada, "Ada's Plan").await;
    let lessons = lesson_ids(&pool, &ada, plan_id).await;
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/lessons/{}/quiz-attempts", lessons[0]),
        &ada,
        json!({ "score": 3, "total": 3, "plan_id": plan_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(build_test_app(pool.clone()), "/api/v1/account", &ada).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The account no longer authenticates.
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({
            "login_type": "username",
            "login_value": "ada",
            "password": TEST_PASSWORD,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Her score survives on the leaderboard, anonymized.
    let response = get_auth(build_test_app(pool), "/api/v1/quizzes", &grace).await;
    let body = body_json(response).await;
    let leaderboard = body["data"]["leaderboard"].as_array().unwrap();
    assert_eq!(leaderboard.len(), 1);
    assert_eq!(leaderboard[0]["name"], "Anonymous User");
    assert_eq!(leaderboard[0]["score"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_dashboard_summary(pool: PgPool) {
    let token = register_and_login(&pool, "ada").await;

    // Empty state first.
    let response = get_auth(build_test_app(pool.clone()), "/api/v1/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Test User");
    assert_eq!(body["data"]["plan_count"], 0);
    assert!(body["data"]["latest_plan"].is_null());

    save_plan(&pool, &token, "Learn Rust").await;
    save_plan(&pool, &token, "Learn Go").await;

    let response = get_auth(build_test_app(pool), "/api/v1/dashboard", &token).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["plan_count"], 2);
    assert_eq!(body["data"]["latest_plan"]["plan_title"], "Learn Go");
}
