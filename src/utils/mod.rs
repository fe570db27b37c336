//! Helpers used across the application.
//!
//! - [`code_generator`] - Random short code generation
//! - [`request_context`] - Scheme, host and base path extraction from HTTP requests

pub mod code_generator;
pub mod request_context;
