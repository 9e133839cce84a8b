use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::models::task::Task;
use crate::AppState;

/// Lists every task, clearing yesterday's completion flags on the first call
/// of a new day.
pub async fn list_tasks(State(state): State<AppState>) -> AppResult<Json<Vec<Task>>> {
    let today = Utc::now().date_naive();

    if state.storage.reset_tasks_if_due(today).await? {
        tracing::info!(%today, "Daily task reset performed");
    }

    let tasks = state.storage.list_tasks().await?;
    Ok(Json(tasks))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    WithRejection(Path(task_id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Task>> {
    let task = state
        .storage
        .toggle_task(task_id, Utc::now())
        .await?
        .ok_or(AppError::NotFound("Task not found".into()))?;

    tracing::debug!(
        task_id = task.id,
        completed = task.completed,
        streak = task.streak,
        "Task toggled"
    );

    Ok(Json(task))
}
