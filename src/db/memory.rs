use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::gym_log::{GymLog, GymLogFields};
use crate::models::task::Task;
use crate::models::user::User;
use crate::services::{daily_reset, streak};

/// In-process store with the same semantics as the Postgres schema.
/// Every operation runs under one lock, so each read-modify-write is atomic.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    tasks: Vec<Task>,
    gym_logs: Vec<GymLog>,
    last_reset_date: Option<NaiveDate>,
}

fn next_id(len: usize) -> i32 {
    len as i32 + 1
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find_user(&self, id: i32) -> AppResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    pub async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    pub async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "username '{}' already exists",
                username
            )));
        }
        let user = User {
            id: next_id(tables.users.len()),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    pub async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        let tables = self.tables.lock().await;
        // Insertion order is id order
        Ok(tables.tasks.clone())
    }

    pub async fn count_tasks(&self) -> AppResult<i64> {
        let tables = self.tables.lock().await;
        Ok(tables.tasks.len() as i64)
    }

    pub async fn create_task(&self, title: &str, is_system: bool) -> AppResult<Task> {
        let mut tables = self.tables.lock().await;
        let task = Task {
            id: next_id(tables.tasks.len()),
            title: title.to_string(),
            completed: false,
            streak: 0,
            last_completed_at: None,
            is_system,
        };
        tables.tasks.push(task.clone());
        Ok(task)
    }

    pub async fn toggle_task(&self, id: i32, now: DateTime<Utc>) -> AppResult<Option<Task>> {
        let mut tables = self.tables.lock().await;
        let Some(task) = tables.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        streak::apply_toggle(task, now);
        Ok(Some(task.clone()))
    }

    pub async fn last_reset_date(&self) -> AppResult<Option<NaiveDate>> {
        Ok(self.tables.lock().await.last_reset_date)
    }

    pub async fn reset_tasks_if_due(&self, today: NaiveDate) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;

        if !daily_reset::is_reset_due(tables.last_reset_date, today) {
            return Ok(false);
        }

        tables.tasks.iter_mut().for_each(streak::reset_completion);
        tables.last_reset_date = Some(today);
        Ok(true)
    }

    pub async fn find_gym_log(&self, date: NaiveDate) -> AppResult<Option<GymLog>> {
        let tables = self.tables.lock().await;
        Ok(tables.gym_logs.iter().find(|l| l.date == date).cloned())
    }

    pub async fn list_gym_logs(&self) -> AppResult<Vec<GymLog>> {
        let tables = self.tables.lock().await;
        let mut logs = tables.gym_logs.clone();
        logs.sort_by_key(|l| l.date);
        Ok(logs)
    }

    pub async fn upsert_gym_log(&self, date: NaiveDate, fields: &GymLogFields) -> AppResult<GymLog> {
        let mut tables = self.tables.lock().await;

        if let Some(existing) = tables.gym_logs.iter_mut().find(|l| l.date == date) {
            existing.pushups_count = fields.pushups_count;
            existing.biceps_sets = fields.biceps_sets.clone();
            existing.shoulder_sets = fields.shoulder_sets.clone();
            return Ok(existing.clone());
        }

        let log = GymLog {
            id: next_id(tables.gym_logs.len()),
            date,
            pushups_count: fields.pushups_count,
            biceps_sets: fields.biceps_sets.clone(),
            shoulder_sets: fields.shoulder_sets.clone(),
        };
        tables.gym_logs.push(log.clone());
        Ok(log)
    }
}
