//! Mapping store contract.
//!
//! The trait here is implemented by the backends in
//! `crate::infrastructure::persistence`. A mock is generated via `mockall`
//! for unit tests.

pub mod mapping_repository;

pub use mapping_repository::{MappingRepository, StoreError, WriteMode};

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
