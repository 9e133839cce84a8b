use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::gym_log::{GymLog, GymLogFields};
use crate::models::task::Task;
use crate::models::user::User;
use crate::services::{daily_reset, streak};

#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find_user(&self, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>("SELECT * FROM tasks ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    pub async fn count_tasks(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn create_task(&self, title: &str, is_system: bool) -> AppResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, is_system)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(is_system)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    pub async fn toggle_task(&self, id: i32, now: DateTime<Utc>) -> AppResult<Option<Task>> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut task) = current else {
            return Ok(None);
        };

        streak::apply_toggle(&mut task, now);

        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET
                completed = $2,
                streak = $3,
                last_completed_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(task.id)
        .bind(task.completed)
        .bind(task.streak)
        .bind(task.last_completed_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    pub async fn last_reset_date(&self) -> AppResult<Option<NaiveDate>> {
        let date = sqlx::query_scalar::<_, Option<NaiveDate>>(
            "SELECT last_reset_date FROM daily_reset WHERE id",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(date)
    }

    pub async fn reset_tasks_if_due(&self, today: NaiveDate) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let last_reset = sqlx::query_scalar::<_, Option<NaiveDate>>(
            "SELECT last_reset_date FROM daily_reset WHERE id FOR UPDATE",
        )
        .fetch_one(&mut *tx)
        .await?;

        if !daily_reset::is_reset_due(last_reset, today) {
            return Ok(false);
        }

        sqlx::query("UPDATE tasks SET completed = FALSE WHERE completed")
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE daily_reset SET last_reset_date = $1 WHERE id")
            .bind(today)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    pub async fn find_gym_log(&self, date: NaiveDate) -> AppResult<Option<GymLog>> {
        let log = sqlx::query_as::<_, GymLog>("SELECT * FROM gym_logs WHERE date = $1")
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(log)
    }

    pub async fn list_gym_logs(&self) -> AppResult<Vec<GymLog>> {
        let logs = sqlx::query_as::<_, GymLog>("SELECT * FROM gym_logs ORDER BY date ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(logs)
    }

    pub async fn upsert_gym_log(&self, date: NaiveDate, fields: &GymLogFields) -> AppResult<GymLog> {
        let log = sqlx::query_as::<_, GymLog>(
            r#"
            INSERT INTO gym_logs (date, pushups_count, biceps_sets, shoulder_sets)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (date) DO UPDATE SET
                pushups_count = EXCLUDED.pushups_count,
                biceps_sets = EXCLUDED.biceps_sets,
                shoulder_sets = EXCLUDED.shoulder_sets
            RETURNING *
            "#,
        )
        .bind(date)
        .bind(fields.pushups_count)
        .bind(Json(&fields.biceps_sets))
        .bind(Json(&fields.shoulder_sets))
        .fetch_one(&self.pool)
        .await?;
        Ok(log)
    }
}
