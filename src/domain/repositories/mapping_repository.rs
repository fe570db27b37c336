//! Repository trait for short code to target URL persistence.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by a mapping store backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("mapping store unavailable: {0}")]
    Unavailable(String),

    /// The backend answered but refused the operation, e.g. a missing table
    /// or a permission error. Retrying will not help.
    #[error("mapping store rejected the operation: {0}")]
    Rejected(String),

    /// The operation did not finish within the per-request bound.
    #[error("mapping store timed out after {0:?}")]
    Timeout(Duration),

    /// A [`WriteMode::CreateOnly`] write hit an existing code.
    #[error("short code already exists: {0}")]
    Conflict(String),

    /// The backend was configured with a name or location it cannot use.
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Returns true for failures worth retrying after a short backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }
}

/// How [`MappingRepository::put`] treats an existing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Fail with [`StoreError::Conflict`] if the code is already taken.
    #[default]
    CreateOnly,
    /// Overwrite whatever is stored under the code.
    Upsert,
}

/// Key-value store for mappings, keyed by short code.
///
/// Writes are single-key and must be atomic at the backend, so an
/// abandoned request never leaves a half-written mapping behind.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL table
/// - [`crate::infrastructure::persistence::RedisMappingRepository`] - Redis keyspace
/// - [`crate::infrastructure::persistence::MemoryMappingRepository`] - In-process map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Stores `target_url` under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if `mode` is [`WriteMode::CreateOnly`]
    /// and the code exists. Returns [`StoreError::Unavailable`] if the backend
    /// cannot be reached.
    async fn put(&self, code: &str, target_url: &str, mode: WriteMode) -> Result<(), StoreError>;

    /// Looks up the target URL for `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be reached.
    async fn get(&self, code: &str) -> Result<Option<String>, StoreError>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;
}
