//! Daily planner backend: recurring daily tasks with streaks, and per-day gym
//! logs, behind a session-authenticated JSON API.

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use auth::rate_limit::RateLimitState;
use auth::session::SessionStore;
use config::Config;
use db::Storage;

const CLEANUP_INTERVAL_SECS: u64 = 300;

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(storage: Storage, config: Config) -> Self {
        Self {
            storage,
            config: Arc::new(config),
            sessions: SessionStore::new(),
            rate_limiter: RateLimitState::new(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let login_routes = Router::new()
        .route("/api/login", post(handlers::auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_login,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(login_routes);

    let protected_routes = Router::new()
        .route("/api/logout", post(handlers::auth::logout))
        .route("/api/user", get(handlers::auth::me))
        // Tasks
        .route("/api/tasks", get(handlers::tasks::list_tasks))
        .route("/api/tasks/:id/toggle", patch(handlers::tasks::toggle_task))
        // Gym
        .route("/api/gym/today", get(handlers::gym::get_today))
        .route("/api/gym/log", post(handlers::gym::upsert_today))
        .route("/api/gym/history", get(handlers::gym::history))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Periodically drops expired sessions and stale rate-limit windows.
pub fn spawn_cleanup_worker(state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));
        // First tick fires immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let removed = state.sessions.cleanup().await;
            state.rate_limiter.cleanup().await;
            if removed > 0 {
                tracing::debug!(removed, "Purged expired sessions");
            }
        }
    });
}
