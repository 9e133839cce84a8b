pub mod auth;
pub mod gym;
pub mod health;
pub mod tasks;
