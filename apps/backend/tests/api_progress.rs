//! Progress, statistics and result history API tests.

mod common;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::Value;

use kannada_lessons_backend::config::Config;
use kannada_lessons_backend::models::UserProgress;

use common::fixtures;
use common::TestContext;

async fn complete_lesson_001(server: &axum_test::TestServer, user: &str) -> Value {
    let response = server
        .post("/api/lessons/lesson_001/complete")
        .add_header(TestContext::user_header(), user.to_string())
        .json(&fixtures::complete_request(fixtures::LESSON_001_PERFECT))
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn test_progress_absent_for_new_user() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/progress")
        .add_header(TestContext::user_header(), TestContext::new_user())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["progress"].is_null());
}

#[tokio::test]
async fn test_stats_for_new_user() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/progress/stats")
        .add_header(TestContext::user_header(), TestContext::new_user())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["xp"], 0);
    assert_eq!(body["streak"], 0);
    assert_eq!(body["completed_lessons"], 0);
    assert_eq!(body["total_lessons"], 5);
    assert_eq!(body["daily_goal"]["goal"], 50);
    assert_eq!(body["daily_goal"]["remaining"], 50);
}

#[tokio::test]
async fn test_stats_after_completion() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let user = TestContext::new_user();

    complete_lesson_001(&server, &user).await;

    let body: Value = server
        .get("/api/progress/stats")
        .add_header(TestContext::user_header(), user.clone())
        .await
        .json();

    assert_eq!(body["xp"], 15);
    assert_eq!(body["streak"], 1);
    assert_eq!(body["total_stars"], 3);
    assert_eq!(body["completed_lessons"], 1);
    assert_eq!(body["perfect_lessons"], 1);
    assert_eq!(body["average_score"], 100.0);
    assert_eq!(body["progress_fraction"], 0.2);
    assert_eq!(body["daily_goal"]["earned"], 15);
    assert_eq!(body["daily_goal"]["remaining"], 35);
}

#[tokio::test]
async fn test_stats_use_configured_goal() {
    let ctx = TestContext::with_config(Config {
        daily_xp_goal: 10,
        ..Config::default()
    });
    let server = ctx.server();
    let user = TestContext::new_user();

    complete_lesson_001(&server, &user).await;

    let body: Value = server
        .get("/api/progress/stats")
        .add_header(TestContext::user_header(), user.clone())
        .await
        .json();

    assert_eq!(body["daily_goal"]["goal"], 10);
    assert_eq!(body["daily_goal"]["earned"], 5);
}

#[tokio::test]
async fn test_retake_adds_attempt_and_xp() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let user = TestContext::new_user();

    complete_lesson_001(&server, &user).await;
    let body = complete_lesson_001(&server, &user).await;

    assert_eq!(body["streak"], "same_day");
    assert_eq!(body["progress"]["xp"], 30);
    assert_eq!(body["progress"]["streak"], 1);
    assert_eq!(
        body["progress"]["completed_lesson_ids"]
            .as_array()
            .unwrap()
            .len(),
        1
    );
    assert_eq!(body["progress"]["lesson_progress"]["lesson_001"]["attempts"], 2);
}

#[tokio::test]
async fn test_streak_extends_after_one_day() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let user = TestContext::new_user();

    let mut prior = UserProgress::new(user.clone());
    prior.streak = 4;
    prior.xp = 100;
    prior.last_activity_date = Some(Utc::now() - Duration::hours(25));
    ctx.put_progress(&prior).await;

    let body = complete_lesson_001(&server, &user).await;

    assert_eq!(body["streak"], "extended");
    assert_eq!(body["progress"]["streak"], 5);
    assert_eq!(body["progress"]["xp"], 115);
}

#[tokio::test]
async fn test_streak_resets_after_gap() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let user = TestContext::new_user();

    let mut prior = UserProgress::new(user.clone());
    prior.streak = 9;
    prior.last_activity_date = Some(Utc::now() - Duration::days(3));
    ctx.put_progress(&prior).await;

    let body = complete_lesson_001(&server, &user).await;

    assert_eq!(body["streak"], "reset");
    assert_eq!(body["progress"]["streak"], 1);
}

#[tokio::test]
async fn test_future_activity_leaves_streak() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let user = TestContext::new_user();

    let mut prior = UserProgress::new(user.clone());
    prior.streak = 3;
    prior.last_activity_date = Some(Utc::now() + Duration::days(2));
    ctx.put_progress(&prior).await;

    let body = complete_lesson_001(&server, &user).await;

    assert!(body["streak"]["clock_skew"].is_object());
    assert_eq!(body["progress"]["streak"], 3);
}

#[tokio::test]
async fn test_results_history() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let user = TestContext::new_user();

    complete_lesson_001(&server, &user).await;
    server
        .post("/api/lessons/lesson_002/complete")
        .add_header(TestContext::user_header(), user.clone())
        .json(&fixtures::complete_request(fixtures::LESSON_002_WITH_TYPO))
        .await
        .assert_status_ok();

    let body: Value = server
        .get("/api/progress/results")
        .add_header(TestContext::user_header(), user.clone())
        .await
        .json();

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["lesson_id"], "lesson_001");
    assert_eq!(results[1]["lesson_id"], "lesson_002");

    // Other users see nothing
    let other: Value = server
        .get("/api/progress/results")
        .add_header(TestContext::user_header(), TestContext::new_user())
        .await
        .json();
    assert!(other["results"].as_array().unwrap().is_empty());
}
