use axum::{extract::State, Extension, Json};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};
use validator::Validate;

use crate::auth::{
    jwt::create_session_token,
    middleware::{AuthUser, SESSION_COOKIE},
    password::verify_password,
};
use crate::dto::{LoginRequest, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::models::user::UserProfile;
use crate::AppState;

fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .into()
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<(CookieJar, Json<UserProfile>)> {
    body.validate()?;

    let user = state
        .storage
        .find_user_by_username(&body.username)
        .await?;

    // Same answer for unknown user and bad password
    let verified = match &user {
        Some(u) => verify_password(&body.password, &u.password_hash)?,
        None => false,
    };
    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::warn!(username = %body.username, "Failed login attempt");
            return Err(AppError::Unauthorized);
        }
    };

    let (session_id, expires_at) = state
        .sessions
        .create(user.id, state.config.session_ttl_secs)
        .await;
    let token = create_session_token(user.id, session_id, expires_at, &state.config)?;

    tracing::info!(user_id = user.id, session_id = %session_id, "User logged in");

    let jar = jar.add(session_cookie(token, state.config.cookie_secure));
    Ok((jar, Json(user.into())))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    state.sessions.destroy(auth_user.session_id).await;
    tracing::info!(user_id = auth_user.id, "User logged out");

    let jar = jar.remove(session_cookie(String::new(), state.config.cookie_secure));
    Ok((jar, Json(MessageResponse::new("Logged out"))))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .storage
        .find_user(auth_user.id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(user.into()))
}
