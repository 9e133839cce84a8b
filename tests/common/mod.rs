#![allow(dead_code)]

use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use daily_planner_api::{config::Config, create_router, db::Storage, services::seed, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use std::net::SocketAddr;
use tower::ServiceExt;

pub const USERNAME: &str = "Sakthi";
pub const PASSWORD: &str = "Sakthi@123";

/// Seeded app on the in-memory backend. Returns the router and the shared state.
pub async fn create_test_app() -> (Router, AppState) {
    let config = Config::test_default();
    let storage = Storage::memory();
    seed::run(&storage, &config).await.expect("seed");

    let state = AppState::new(storage, config);
    let app = create_router(state.clone())
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
    (app, state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

/// `name=value` pair of the session cookie set by a response.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("planner_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Log in as the seeded user and return the cookie to send back.
pub async fn login(app: &Router) -> String {
    login_as(app, USERNAME, PASSWORD).await
}

pub async fn login_as(app: &Router, username: &str, password: &str) -> String {
    let res = send(
        app,
        Method::POST,
        "/api/login",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK, "login failed: {:?}", res.body);
    session_cookie(&res.headers).expect("session cookie")
}
