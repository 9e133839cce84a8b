pub mod gym_log;
pub mod task;
pub mod user;
