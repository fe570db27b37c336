//! Data Transfer Objects for request parameters and JSON responses.

pub mod dispatch;
pub mod health;
