use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Titles of the system tasks seeded into an empty task table, in display order.
pub const DEFAULT_TASK_TITLES: [&str; 6] = [
    "GCP Certification",
    "DevOps Practice",
    "Learn C#",
    "Unity",
    "Unreal Engine",
    "Gym Workout",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    pub streak: i32,
    pub last_completed_at: Option<DateTime<Utc>>,
    pub is_system: bool,
}
