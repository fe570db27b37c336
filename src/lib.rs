//! # Link Redirector
//!
//! A small short-link service built with Axum. It maps target URLs to short
//! random codes and redirects those codes back to their targets.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Mapping entity, store trait, request classification
//! - **Application Layer** ([`application`]) - Code allocation and lookup with store bounds
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL, Redis and in-memory stores
//! - **API Layer** ([`api`]) - Handlers, response rendering and middleware
//!
//! ## Endpoints
//!
//! | Request | Response |
//! |---|---|
//! | `GET /?targetUrl=URL` | `200 Created URL: <scheme>://<host><base-path><code>` |
//! | `GET /<code>` | `301 Location: <target>`, or `400 No redirect found for <code>` |
//! | anything else | `200 usage: ?targetUrl=URL` |
//!
//! ## Quick Start
//!
//! ```bash
//! export MAPPING_STORE_URL="redis://localhost:6379/0"
//! export MAPPING_TABLE="url_mappings"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{MappingService, StorePolicy};
    pub use crate::domain::entities::Mapping;
    pub use crate::domain::repositories::{MappingRepository, StoreError, WriteMode};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
