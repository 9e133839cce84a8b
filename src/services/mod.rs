//! Domain rules shared by every storage backend.

pub mod daily_reset;
pub mod gym;
pub mod seed;
pub mod streak;
