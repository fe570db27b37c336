//! HTTP request handlers.

pub mod dispatch;
pub mod health;

pub use dispatch::{code_handler, root_handler, usage_handler};
pub use health::health_handler;
