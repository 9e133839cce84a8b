use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseSet {
    pub completed: bool,
    pub reps: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GymLog {
    pub id: i32,
    pub date: NaiveDate,
    pub pushups_count: i32,
    #[sqlx(json)]
    pub biceps_sets: Vec<ExerciseSet>,
    #[sqlx(json)]
    pub shoulder_sets: Vec<ExerciseSet>,
}

/// Fully-defaulted field values written by an upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct GymLogFields {
    pub pushups_count: i32,
    pub biceps_sets: Vec<ExerciseSet>,
    pub shoulder_sets: Vec<ExerciseSet>,
}

/// A gym log as returned over the API, with the derived metrics alongside.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GymLogView {
    #[serde(flatten)]
    pub log: GymLog,
    pub completion_percentage: f64,
    pub pushup_progress: f64,
}
