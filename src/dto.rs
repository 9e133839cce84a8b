//! Request/response bodies that are not plain models.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::gym_log::ExerciseSet;

pub const MAX_REPS: i32 = 1_000;
pub const MAX_SETS_PER_GROUP: usize = 20;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// POST /api/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// POST /api/gym/log. The date is always the server's today.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GymLogRequest {
    #[validate(range(min = 0, max = 100000, message = "pushupsCount must be between 0 and 100000"))]
    pub pushups_count: Option<i32>,

    #[validate(custom = "validate_sets")]
    pub biceps_sets: Option<Vec<ExerciseSet>>,

    #[validate(custom = "validate_sets")]
    pub shoulder_sets: Option<Vec<ExerciseSet>>,
}

#[allow(clippy::ptr_arg)]
fn validate_sets(sets: &Vec<ExerciseSet>) -> Result<(), ValidationError> {
    if sets.len() > MAX_SETS_PER_GROUP {
        let mut err = ValidationError::new("too_many_sets");
        err.message = Some(format!("at most {} sets per group", MAX_SETS_PER_GROUP).into());
        return Err(err);
    }
    if sets.iter().any(|s| !(0..=MAX_REPS).contains(&s.reps)) {
        let mut err = ValidationError::new("reps_out_of_range");
        err.message = Some(format!("reps must be between 0 and {}", MAX_REPS).into());
        return Err(err);
    }
    Ok(())
}
