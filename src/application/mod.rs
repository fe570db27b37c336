//! Application layer services implementing business logic.
//!
//! Services coordinate the code generator and the mapping store, and give
//! HTTP handlers and the admin CLI a single entry point.
//!
//! # Available Services
//!
//! - [`services::mapping_service::MappingService`] - Mapping creation and resolution

pub mod services;
