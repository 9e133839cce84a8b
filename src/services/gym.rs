use chrono::NaiveDate;

use crate::dto::GymLogRequest;
use crate::models::gym_log::{ExerciseSet, GymLog, GymLogFields, GymLogView};

pub const DAILY_PUSHUP_GOAL: i32 = 100;

/// Reps pre-filled for each of the three sets of an unlogged day.
const PLACEHOLDER_REPS: [i32; 3] = [12, 10, 8];

/// Fill in defaults for any field the client left out.
pub fn normalize(req: GymLogRequest) -> GymLogFields {
    GymLogFields {
        pushups_count: req.pushups_count.unwrap_or(0),
        biceps_sets: req.biceps_sets.unwrap_or_default(),
        shoulder_sets: req.shoulder_sets.unwrap_or_default(),
    }
}

/// Renderable log for a date with no stored record. Never persisted.
pub fn placeholder(date: NaiveDate) -> GymLog {
    let sets: Vec<ExerciseSet> = PLACEHOLDER_REPS
        .iter()
        .map(|&reps| ExerciseSet {
            completed: false,
            reps,
        })
        .collect();

    GymLog {
        id: 0,
        date,
        pushups_count: 0,
        biceps_sets: sets.clone(),
        shoulder_sets: sets,
    }
}

/// Share of completed sets across both groups, 0-100. Zero sets reads as 0.
pub fn completion_percentage(log: &GymLog) -> f64 {
    let total = log.biceps_sets.len() + log.shoulder_sets.len();
    if total == 0 {
        return 0.0;
    }
    let done = log
        .biceps_sets
        .iter()
        .chain(log.shoulder_sets.iter())
        .filter(|s| s.completed)
        .count();
    done as f64 / total as f64 * 100.0
}

pub fn pushup_progress(log: &GymLog) -> f64 {
    (log.pushups_count as f64 / DAILY_PUSHUP_GOAL as f64 * 100.0).clamp(0.0, 100.0)
}

impl From<GymLog> for GymLogView {
    fn from(log: GymLog) -> Self {
        let completion_percentage = completion_percentage(&log);
        let pushup_progress = pushup_progress(&log);
        Self {
            log,
            completion_percentage,
            pushup_progress,
        }
    }
}
