use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use validator::Validate;

use crate::dto::GymLogRequest;
use crate::error::{AppError, AppResult};
use crate::models::gym_log::GymLogView;
use crate::services::gym;
use crate::AppState;

/// Today's log, or an unsaved placeholder when nothing has been logged yet.
pub async fn get_today(State(state): State<AppState>) -> AppResult<Json<GymLogView>> {
    let today = Utc::now().date_naive();

    let log = state
        .storage
        .find_gym_log(today)
        .await?
        .unwrap_or_else(|| gym::placeholder(today));

    Ok(Json(log.into()))
}

pub async fn upsert_today(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<GymLogRequest>, AppError>,
) -> AppResult<Json<GymLogView>> {
    body.validate()?;

    let today = Utc::now().date_naive();
    let fields = gym::normalize(body);
    let log = state.storage.upsert_gym_log(today, &fields).await?;

    tracing::debug!(log_id = log.id, date = %log.date, "Gym log saved");

    Ok(Json(log.into()))
}

pub async fn history(State(state): State<AppState>) -> AppResult<Json<Vec<GymLogView>>> {
    let logs = state.storage.list_gym_logs().await?;
    Ok(Json(logs.into_iter().map(GymLogView::from).collect()))
}
