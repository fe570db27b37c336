//! HTTP layer translating requests into mapping operations.
//!
//! # Modules
//!
//! - [`dto`] - Request and response shapes
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware
//! - [`response`] - Wire-level rendering of dispatch outcomes

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod response;
