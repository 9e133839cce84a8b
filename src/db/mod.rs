//! Persistence for users, tasks and gym logs.
//!
//! `Storage` is the single handle the rest of the app talks to. It wraps
//! either the Postgres backend or the in-process store used by tests and
//! `STORAGE_BACKEND=memory` runs.

pub mod memory;
pub mod pool;
pub mod postgres;

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::{Config, StorageBackend};
use crate::error::AppResult;
use crate::models::gym_log::{GymLog, GymLogFields};
use crate::models::task::Task;
use crate::models::user::User;

pub use memory::MemoryStore;
pub use postgres::PgStorage;

#[derive(Clone)]
pub enum Storage {
    Postgres(PgStorage),
    Memory(MemoryStore),
}

impl Storage {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        match config.storage_backend {
            StorageBackend::Postgres => {
                let url = config.database_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL is required for the postgres backend")
                })?;
                let pool = pool::create_pool(url).await?;
                Ok(Storage::Postgres(PgStorage::new(pool)))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Ok(Storage::Memory(MemoryStore::new()))
            }
        }
    }

    pub fn memory() -> Self {
        Storage::Memory(MemoryStore::new())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Storage::Postgres(_) => "postgres",
            Storage::Memory(_) => "memory",
        }
    }

    pub async fn ping(&self) -> AppResult<()> {
        match self {
            Storage::Postgres(db) => db.ping().await,
            Storage::Memory(_) => Ok(()),
        }
    }

    pub async fn find_user(&self, id: i32) -> AppResult<Option<User>> {
        match self {
            Storage::Postgres(db) => db.find_user(id).await,
            Storage::Memory(db) => db.find_user(id).await,
        }
    }

    pub async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        match self {
            Storage::Postgres(db) => db.find_user_by_username(username).await,
            Storage::Memory(db) => db.find_user_by_username(username).await,
        }
    }

    pub async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        match self {
            Storage::Postgres(db) => db.create_user(username, password_hash).await,
            Storage::Memory(db) => db.create_user(username, password_hash).await,
        }
    }

    /// All tasks, ordered by id.
    pub async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        match self {
            Storage::Postgres(db) => db.list_tasks().await,
            Storage::Memory(db) => db.list_tasks().await,
        }
    }

    pub async fn count_tasks(&self) -> AppResult<i64> {
        match self {
            Storage::Postgres(db) => db.count_tasks().await,
            Storage::Memory(db) => db.count_tasks().await,
        }
    }

    pub async fn create_task(&self, title: &str, is_system: bool) -> AppResult<Task> {
        match self {
            Storage::Postgres(db) => db.create_task(title, is_system).await,
            Storage::Memory(db) => db.create_task(title, is_system).await,
        }
    }

    /// Atomically flip a task and adjust its streak. `None` if the id is unknown.
    pub async fn toggle_task(&self, id: i32, now: DateTime<Utc>) -> AppResult<Option<Task>> {
        match self {
            Storage::Postgres(db) => db.toggle_task(id, now).await,
            Storage::Memory(db) => db.toggle_task(id, now).await,
        }
    }

    /// Day on which task completion flags were last cleared, if ever.
    pub async fn last_reset_date(&self) -> AppResult<Option<NaiveDate>> {
        match self {
            Storage::Postgres(db) => db.last_reset_date().await,
            Storage::Memory(db) => db.last_reset_date().await,
        }
    }

    /// Clear every task's completion flag unless that already happened
    /// `today`, then record `today` as the reset date. The marker is shared
    /// by all users since tasks are. Returns whether a reset happened.
    pub async fn reset_tasks_if_due(&self, today: NaiveDate) -> AppResult<bool> {
        match self {
            Storage::Postgres(db) => db.reset_tasks_if_due(today).await,
            Storage::Memory(db) => db.reset_tasks_if_due(today).await,
        }
    }

    pub async fn find_gym_log(&self, date: NaiveDate) -> AppResult<Option<GymLog>> {
        match self {
            Storage::Postgres(db) => db.find_gym_log(date).await,
            Storage::Memory(db) => db.find_gym_log(date).await,
        }
    }

    /// All gym logs, oldest date first.
    pub async fn list_gym_logs(&self) -> AppResult<Vec<GymLog>> {
        match self {
            Storage::Postgres(db) => db.list_gym_logs().await,
            Storage::Memory(db) => db.list_gym_logs().await,
        }
    }

    /// Create or overwrite the single log for `date`.
    pub async fn upsert_gym_log(&self, date: NaiveDate, fields: &GymLogFields) -> AppResult<GymLog> {
        match self {
            Storage::Postgres(db) => db.upsert_gym_log(date, fields).await,
            Storage::Memory(db) => db.upsert_gym_log(date, fields).await,
        }
    }
}
