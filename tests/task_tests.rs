//! Task listing, streak toggling and the once-a-day completion reset.

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::Value;

mod common;

use common::{create_test_app, login, login_as, send};
use daily_planner_api::auth::password::hash_password;

fn task_by_title<'a>(tasks: &'a Value, title: &str) -> &'a Value {
    tasks
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["title"] == title)
        .unwrap_or_else(|| panic!("no task titled {}", title))
}

#[tokio::test]
async fn test_seeded_tasks_listed_in_order() {
    let (app, _) = create_test_app().await;
    let cookie = login(&app).await;

    let res = send(&app, Method::GET, "/api/tasks", Some(&cookie), None).await;
    assert_eq!(res.status, StatusCode::OK);

    let tasks = res.body.as_array().unwrap();
    let titles: Vec<&str> = tasks.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(
        titles,
        vec![
            "GCP Certification",
            "DevOps Practice",
            "Learn C#",
            "Unity",
            "Unreal Engine",
            "Gym Workout"
        ]
    );
    for t in tasks {
        assert_eq!(t["completed"], false);
        assert_eq!(t["streak"], 0);
        assert_eq!(t["isSystem"], true);
        assert!(t["lastCompletedAt"].is_null());
    }
}

#[tokio::test]
async fn test_toggle_complete_then_uncomplete() {
    let (app, _) = create_test_app().await;
    let cookie = login(&app).await;

    let list = send(&app, Method::GET, "/api/tasks", Some(&cookie), None).await;
    let id = task_by_title(&list.body, "Gym Workout")["id"].as_i64().unwrap();
    let uri = format!("/api/tasks/{}/toggle", id);

    let done = send(&app, Method::PATCH, &uri, Some(&cookie), None).await;
    assert_eq!(done.status, StatusCode::OK);
    assert_eq!(done.body["completed"], true);
    assert_eq!(done.body["streak"], 1);
    assert!(done.body["lastCompletedAt"].is_string());

    let undone = send(&app, Method::PATCH, &uri, Some(&cookie), None).await;
    assert_eq!(undone.status, StatusCode::OK);
    assert_eq!(undone.body["completed"], false);
    assert_eq!(undone.body["streak"], 0);
    assert_eq!(undone.body["lastCompletedAt"], done.body["lastCompletedAt"]);
}

#[tokio::test]
async fn test_uncomplete_never_goes_negative() {
    let (app, _) = create_test_app().await;
    let cookie = login(&app).await;
    // Today's reset happens on the first listing
    send(&app, Method::GET, "/api/tasks", Some(&cookie), None).await;

    for _ in 0..7 {
        let res = send(&app, Method::PATCH, "/api/tasks/2/toggle", Some(&cookie), None).await;
        assert!(res.body["streak"].as_i64().unwrap() >= 0);
    }
    let res = send(&app, Method::GET, "/api/tasks", Some(&cookie), None).await;
    let task = task_by_title(&res.body, "DevOps Practice");
    // Odd number of toggles: net one completion
    assert_eq!(task["completed"], true);
    assert_eq!(task["streak"], 1);
}

#[tokio::test]
async fn test_toggle_unknown_task_is_not_found() {
    let (app, _) = create_test_app().await;
    let cookie = login(&app).await;

    let before = send(&app, Method::GET, "/api/tasks", Some(&cookie), None).await;

    let res = send(&app, Method::PATCH, "/api/tasks/999/toggle", Some(&cookie), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Task not found");

    let after = send(&app, Method::GET, "/api/tasks", Some(&cookie), None).await;
    assert_eq!(before.body, after.body);
}

#[tokio::test]
async fn test_completion_survives_same_day_listing() {
    let (app, _) = create_test_app().await;
    let cookie = login(&app).await;

    send(&app, Method::GET, "/api/tasks", Some(&cookie), None).await;
    send(&app, Method::PATCH, "/api/tasks/1/toggle", Some(&cookie), None).await;

    let res = send(&app, Method::GET, "/api/tasks", Some(&cookie), None).await;
    assert_eq!(task_by_title(&res.body, "GCP Certification")["completed"], true);
}

#[tokio::test]
async fn test_new_day_clears_completion_but_keeps_streak() {
    let (app, state) = create_test_app().await;
    let cookie = login(&app).await;

    // Pretend the last reset happened yesterday
    let yesterday = Utc::now().date_naive() - Duration::days(1);
    state.storage.reset_tasks_if_due(yesterday).await.unwrap();

    let done = send(&app, Method::PATCH, "/api/tasks/6/toggle", Some(&cookie), None).await;
    assert_eq!(done.body["completed"], true);
    assert_eq!(done.body["streak"], 1);

    // First listing of "today" crosses the day boundary
    let res = send(&app, Method::GET, "/api/tasks", Some(&cookie), None).await;
    let tasks = res.body.as_array().unwrap();
    assert!(tasks.iter().all(|t| t["completed"] == false));
    let gym = task_by_title(&res.body, "Gym Workout");
    assert_eq!(gym["streak"], 1);
    assert_eq!(gym["lastCompletedAt"], done.body["lastCompletedAt"]);

    assert_eq!(
        state.storage.last_reset_date().await.unwrap(),
        Some(Utc::now().date_naive())
    );
}

#[tokio::test]
async fn test_second_user_listing_keeps_todays_completions() {
    let (app, state) = create_test_app().await;
    let hash = hash_password("second-pass").unwrap();
    state.storage.create_user("second", &hash).await.unwrap();

    let first = login(&app).await;
    send(&app, Method::GET, "/api/tasks", Some(&first), None).await;
    let done = send(&app, Method::PATCH, "/api/tasks/1/toggle", Some(&first), None).await;
    assert_eq!(done.body["completed"], true);

    // Tasks are shared, so another user's first listing of the day must not reset them
    let second = login_as(&app, "second", "second-pass").await;
    let res = send(&app, Method::GET, "/api/tasks", Some(&second), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(task_by_title(&res.body, "GCP Certification")["completed"], true);
}

#[tokio::test]
async fn test_non_numeric_task_id_rejected() {
    let (app, _) = create_test_app().await;
    let cookie = login(&app).await;

    let res = send(&app, Method::PATCH, "/api/tasks/abc/toggle", Some(&cookie), None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["message"].is_string());
}
