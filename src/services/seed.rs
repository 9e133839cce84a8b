use crate::auth::password::hash_password;
use crate::config::Config;
use crate::db::Storage;
use crate::error::AppResult;
use crate::models::task::DEFAULT_TASK_TITLES;

/// Make sure the configured account and the default system tasks exist.
/// Safe to run on every start: each step checks for existing rows first.
pub async fn run(storage: &Storage, config: &Config) -> AppResult<()> {
    if storage
        .find_user_by_username(&config.seed_username)
        .await?
        .is_none()
    {
        let hash = hash_password(&config.seed_password)?;
        let user = storage.create_user(&config.seed_username, &hash).await?;
        tracing::info!(user_id = user.id, username = %user.username, "Seeded user");
    }

    // Any existing task, system or not, means the table was already set up
    if storage.count_tasks().await? == 0 {
        for title in DEFAULT_TASK_TITLES {
            storage.create_task(title, true).await?;
        }
        tracing::info!(count = DEFAULT_TASK_TITLES.len(), "Seeded default tasks");
    }

    Ok(())
}
