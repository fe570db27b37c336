//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`persistence`] - Mapping store backends (PostgreSQL, Redis, in-memory)

pub mod persistence;
