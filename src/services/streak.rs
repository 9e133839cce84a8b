use chrono::{DateTime, Utc};

use crate::models::task::Task;

/// Flip a task's completion and move its streak with it.
///
/// Completing bumps the streak and stamps `last_completed_at`. Un-completing
/// takes one off the streak (never below zero) and keeps the previous
/// completion timestamp. The streak is a net toggle count, not a
/// consecutive-day measure.
pub fn apply_toggle(task: &mut Task, now: DateTime<Utc>) {
    task.completed = !task.completed;
    if task.completed {
        task.streak = task.streak.saturating_add(1);
        task.last_completed_at = Some(now);
    } else {
        task.streak = (task.streak - 1).max(0);
    }
}

/// Clear the daily completion flag, leaving streak and history alone.
pub fn reset_completion(task: &mut Task) {
    task.completed = false;
}
