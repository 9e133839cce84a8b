use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::AppState;

pub const SESSION_COOKIE: &str = "planner_session";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub session_id: Uuid,
}

pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Cookie first, then bearer header for non-browser clients
    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string)
            .ok_or(AppError::Unauthorized)?,
    };

    let claims = verify_token(&token, &state.config)?.claims;

    if !state.sessions.is_active(claims.sid, claims.sub).await {
        tracing::debug!(session_id = %claims.sid, "Rejected token for ended session");
        return Err(AppError::Unauthorized);
    }

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        session_id: claims.sid,
    });
    Ok(next.run(req).await)
}
