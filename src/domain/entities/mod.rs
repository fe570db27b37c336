//! Core domain entities.
//!
//! - [`Mapping`] - A short code bound to its target URL

pub mod mapping;

pub use mapping::Mapping;
